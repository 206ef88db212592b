//! Constants for the interactive shell and search overlay

// Timing constants
/// Quiet period before a typed query is searched
pub const SEARCH_DEBOUNCE_MS: u64 = 200;

/// Cached responses younger than this are served without a request
pub const SEARCH_STALE_TIME_SECS: u64 = 30;

/// Message auto-clear delay in milliseconds
pub const MESSAGE_CLEAR_DELAY_MS: u64 = 3000;

/// Event polling interval in milliseconds
pub const EVENT_POLL_INTERVAL_MS: u64 = 50;

/// Double Ctrl+C timeout in seconds
pub const DOUBLE_CTRL_C_TIMEOUT_SECS: u64 = 1;

/// Number of query/filter combinations kept in the response cache
pub const SEARCH_CACHE_CAPACITY: usize = 64;

// UI Layout constants
/// Height of the trigger bar in the shell header
pub const TRIGGER_BAR_HEIGHT: u16 = 3;

/// Width of the expanded sidebar
pub const SIDEBAR_WIDTH: u16 = 24;

/// Maximum width of the search overlay
pub const OVERLAY_MAX_WIDTH: u16 = 90;

/// Share of the terminal height the overlay may take, in percent
pub const OVERLAY_HEIGHT_PERCENT: u16 = 70;

/// Rows between the top of the terminal and the overlay
pub const OVERLAY_TOP_MARGIN: u16 = 2;

pub const EXIT_PROMPT: &str = "Press Ctrl+C again to exit";
