//! scroll — a forward-only terminal pager with timer-driven auto-scroll
//!
//! Displays a text stream one screen-page at a time. Space advances a page,
//! Enter toggles auto-scrolling (one line per timer tick), `f`/`s` adjust the
//! scroll speed, `q` quits. A reverse-video status line at the bottom of the
//! screen reflects the current state.
//!
//! - `render`: byte stream to screen lines (tab expansion, width wrapping)
//! - `prompt`: the reverse-video status line overlay
//! - `scroll`: the idle/auto mode state machine and scroll interval
//! - `input`: raw keystrokes to ordered action lists
//! - `session`: one paging session driven by events
//! - `event_loop`: the serial loop multiplexing keystrokes and the timer
//! - `tty`: raw-mode guard, window size, interrupt flag

pub mod error;
pub mod event_loop;
pub mod input;
pub mod prompt;
pub mod render;
pub mod scroll;
pub mod session;
pub mod tty;

pub use error::{Error, Result};
