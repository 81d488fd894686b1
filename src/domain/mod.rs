pub mod collection;
pub mod geometry;
pub mod item;

pub use collection::NewsCollection;
pub use geometry::{Position, ScreenSize, WindowGeometry};
pub use item::{NewsItem, RawEntry, RawFeed};
