//! Keystroke dispatch
//!
//! Maps one raw control-terminal byte to an ordered list of actions. The
//! compound cases are explicit: space stops auto-scroll first and then
//! always advances a page, whatever the prior mode was. Speed changes are
//! reachable from auto mode only.

use crate::scroll::Mode;

/// Interval multiplier for `f` (scroll faster).
pub const SPEED_UP: f64 = 0.8;
/// Interval multiplier for `s` (scroll slower).
pub const SLOW_DOWN: f64 = 1.2;

/// One step a keystroke asks the session to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave auto mode, disarm the timer
    StopAuto,
    /// Render one page
    PageForward,
    /// Enter auto mode at the default interval
    StartAuto,
    /// Multiply the interval by [`SPEED_UP`]
    SpeedUp,
    /// Multiply the interval by [`SLOW_DOWN`]
    SlowDown,
    /// End the session for the current stream
    Quit,
}

/// Ordered actions for one keystroke in the given mode. Unmapped keys
/// produce nothing.
pub fn dispatch(key: u8, mode: Mode) -> &'static [Action] {
    use Action::*;
    match (key, mode) {
        (b' ', Mode::Auto) => &[StopAuto, PageForward],
        (b' ', Mode::Idle) => &[PageForward],
        (b'\n' | b'\r', Mode::Auto) => &[StopAuto],
        (b'\n' | b'\r', Mode::Idle) => &[StartAuto],
        (b'f', Mode::Auto) => &[SpeedUp],
        (b's', Mode::Auto) => &[SlowDown],
        (b'q', _) => &[Quit],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Action::*;

    #[test]
    fn space_pages_from_idle() {
        assert_eq!(dispatch(b' ', Mode::Idle), &[PageForward]);
    }

    #[test]
    fn space_stops_scrolling_then_pages() {
        assert_eq!(dispatch(b' ', Mode::Auto), &[StopAuto, PageForward]);
    }

    #[test]
    fn enter_toggles_auto_mode() {
        assert_eq!(dispatch(b'\n', Mode::Idle), &[StartAuto]);
        assert_eq!(dispatch(b'\n', Mode::Auto), &[StopAuto]);
        assert_eq!(dispatch(b'\r', Mode::Idle), &[StartAuto]);
    }

    #[test]
    fn speed_keys_only_apply_in_auto_mode() {
        assert_eq!(dispatch(b'f', Mode::Auto), &[SpeedUp]);
        assert_eq!(dispatch(b's', Mode::Auto), &[SlowDown]);
        assert!(dispatch(b'f', Mode::Idle).is_empty());
        assert!(dispatch(b's', Mode::Idle).is_empty());
    }

    #[test]
    fn quit_works_from_any_mode() {
        assert_eq!(dispatch(b'q', Mode::Idle), &[Quit]);
        assert_eq!(dispatch(b'q', Mode::Auto), &[Quit]);
    }

    #[test]
    fn other_keys_are_ignored() {
        for key in [b'x', b'Q', 0x1b, b'0'] {
            assert!(dispatch(key, Mode::Idle).is_empty());
            assert!(dispatch(key, Mode::Auto).is_empty());
        }
    }
}
