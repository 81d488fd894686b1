//! Keybinding configuration for the overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Key strings bound to each overlay action. Several keys may share one action.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub next: Vec<String>,
    pub dismiss: Vec<String>,
    pub open_link: Vec<String>,
    pub scroll_up: Vec<String>,
    pub scroll_down: Vec<String>,
    pub grow: Vec<String>,
    pub shrink: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            next: keys(&["Down", "j", "Space"]),
            dismiss: keys(&["Esc", "q", "Ctrl+c"]),
            open_link: keys(&["o", "Enter"]),
            scroll_up: keys(&["PageUp", "u"]),
            scroll_down: keys(&["PageDown", "d"]),
            grow: keys(&["+", "="]),
            shrink: keys(&["-"]),
        }
    }
}

impl KeybindingConfig {
    /// Action bound to a key event, or [`Action::None`] if nothing matches.
    /// Dismiss is checked first.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table = [
            (&self.dismiss, Action::Dismiss),
            (&self.next, Action::Next),
            (&self.open_link, Action::OpenLink),
            (&self.scroll_up, Action::ScrollUp),
            (&self.scroll_down, Action::ScrollDown),
            (&self.grow, Action::Grow),
            (&self.shrink, Action::Shrink),
        ];

        table
            .into_iter()
            .find(|(bindings, _)| matches_key(key, bindings))
            .map(|(_, action)| action)
            .unwrap_or(Action::None)
    }

    /// Bindings that fail to parse, as `(binding, error)` pairs.
    pub fn invalid_bindings(&self) -> Vec<(String, String)> {
        [
            &self.next,
            &self.dismiss,
            &self.open_link,
            &self.scroll_up,
            &self.scroll_down,
            &self.grow,
            &self.shrink,
        ]
        .into_iter()
        .flatten()
        .filter_map(|b| parse_key_string(b).err().map(|e| (b.clone(), e)))
        .collect()
    }
}

fn matches_key(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings
        .iter()
        .filter_map(|binding| parse_key_string(binding).ok())
        .any(|parsed| parsed.matches(key))
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Check if this binding matches a key event.
    ///
    /// Shift is ignored when the binding does not ask for it, since
    /// terminals report it for shifted characters like `+`.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string into a KeyBinding.
///
/// Supported formats:
/// - Single characters: "j", "+", "="; "Plus" also names `+`
/// - Special keys: "Enter", "Esc", "Space", "Tab", "PageUp", "PageDown",
///   "Up", "Down", "Left", "Right", "Home", "End", "F1"-"F12"
/// - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter", "Ctrl+Shift+a"
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    if s == "+" {
        return Ok(KeyBinding {
            code: KeyCode::Char('+'),
            modifiers: KeyModifiers::NONE,
        });
    }

    let parts: Vec<&str> = s.split('+').collect();
    let (key_part, modifier_parts) = parts
        .split_last()
        .ok_or_else(|| format!("Empty key binding: {:?}", s))?;

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_parts {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        }
    }

    let code = parse_key_code(key_part)?;
    Ok(KeyBinding { code, modifiers })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        "plus" => Ok(KeyCode::Char('+')),
        other => other
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F)
            .ok_or_else(|| format!("Unknown key: {}", s)),
    }
}
