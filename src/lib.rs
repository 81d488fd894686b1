//! # newsticker
//!
//! A small always-on-top ticker that cycles through headlines aggregated from
//! a fixed list of RSS/Atom feeds.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → Aggregator → OverlayController ⇄ OverlayWindow
//!                                            ↕
//!                                      PositionStore
//! ```
//!
//! Aggregation runs once, on a background task. Its result is handed to the
//! overlay, which then runs a single-threaded event loop until dismissed.
//!
//! ## Quick Start
//!
//! ```bash
//! # Show the ticker with the configured feeds
//! newsticker
//!
//! # Show a single feed
//! newsticker --feed https://blog.rust-lang.org/feed.xml
//!
//! # Print headlines without the overlay
//! newsticker list
//! ```

/// Application context and error types.
pub mod app;

/// Feed fan-out with skip-on-failure and title ordering.
pub mod aggregator;

/// Command-line interface using clap.
///
/// - (default) / `show` - run the overlay
/// - `list` - print the aggregated headlines
/// - `reset-position` - forget the remembered window position
pub mod cli;

/// Configuration loaded from `~/.config/newsticker/config.toml`:
/// feed list, fetch options, overlay geometry and animation, colors and
/// keybindings.
pub mod config;

/// Core domain models: [`NewsItem`](domain::NewsItem),
/// [`NewsCollection`](domain::NewsCollection) and
/// [`WindowGeometry`](domain::WindowGeometry).
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async transport trait
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Markup cleanup and feed parsing.
pub mod normalizer;

/// The overlay state machine, its fade timeline and the window capability
/// it drives.
pub mod overlay;

/// Window geometry persistence.
pub mod store;

/// Terminal realisation of the overlay window: a draggable floating panel
/// drawn with ratatui.
pub mod tui;
