use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app::Result;
use crate::domain::{Position, ScreenSize, WindowGeometry};
use crate::store::{Margins, PositionStore};

/// On-disk shape. Missing keys fall back to the default placement one by one;
/// anything that is not an object of integers falls back entirely.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredGeometry {
    x: Option<i32>,
    y: Option<i32>,
    width: Option<i32>,
    height: Option<i32>,
}

/// Geometry persisted as a small JSON object in a per-user file.
#[derive(Debug, Clone)]
pub struct JsonPositionStore {
    path: PathBuf,
    margins: Margins,
}

impl JsonPositionStore {
    pub fn new(path: impl Into<PathBuf>, margins: Margins) -> Self {
        Self {
            path: path.into(),
            margins,
        }
    }

    /// `~/.config/newsticker/position.json`, if a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("newsticker").join("position.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Forget the persisted geometry. A missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn read(&self) -> Result<StoredGeometry> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, geometry: &WindowGeometry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredGeometry {
            x: Some(geometry.x),
            y: Some(geometry.y),
            width: Some(geometry.width),
            height: Some(geometry.height),
        };
        fs::write(&self.path, serde_json::to_string(&stored)?)?;
        Ok(())
    }
}

impl PositionStore for JsonPositionStore {
    fn load(&self, screen: ScreenSize, width: i32, height: i32) -> Position {
        let fallback = self.margins.default_position(screen, width, height);
        let stored = match self.read() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::debug!("Using default position ({}): {}", self.path.display(), e);
                StoredGeometry::default()
            }
        };

        screen.clamp_origin(
            stored.x.unwrap_or(fallback.x),
            stored.y.unwrap_or(fallback.y),
            width,
            height,
        )
    }

    fn save(&self, geometry: &WindowGeometry) {
        if let Err(e) = self.write(geometry) {
            tracing::debug!("Failed to save position to {}: {}", self.path.display(), e);
        }
    }
}
