//! This module contains global constants used across the composer, renderer and scheduler.

/// Screen width in character cells.
pub const SCREEN_WIDTH: usize = 40;
/// Screen height in character rows.
pub const SCREEN_HEIGHT: usize = 24;

/// Row 0 carries the status line.
pub const STATUS_ROW: usize = 0;
/// First row of the big-header banner.
pub const HEADER_FIRST_ROW: usize = 1;
/// Number of rows the banner occupies (one per glyph pixel row).
pub const HEADER_ROWS: usize = 5;
/// First row available to page body lines.
pub const BODY_FIRST_ROW: usize = HEADER_FIRST_ROW + HEADER_ROWS;
/// Body capacity: everything below the banner.
pub const BODY_ROWS: usize = SCREEN_HEIGHT - BODY_FIRST_ROW; // 18

/// Longest banner text rendered, extra characters are dropped.
pub const HEADER_MAX_CHARS: usize = 16;
/// Blank column between adjacent banner glyphs.
pub const HEADER_GUTTER: &str = " ";

/// Pixel used for "on" cells in the block font.
pub const GLYPH_FILL: char = '█';
/// Rows per glyph.
pub const GLYPH_ROWS: usize = 5;

/// Tick interval used when the channel descriptor omits or garbles `secondsPerPage`.
pub const DEFAULT_SECONDS_PER_PAGE: f64 = 10.0;

/// Default channel descriptor locator.
pub const DEFAULT_CHANNEL: &str = "channel.json";

/// User agent sent with every HTTP fetch.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));
