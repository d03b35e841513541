//! Status prompt overlay
//!
//! Draws a single reverse-video status line at the cursor position and
//! erases it again without disturbing the text around it. The overlay
//! remembers the visible length of the message it last drew, so erasing
//! backs over exactly that text whatever the state has since become.

use std::io::{self, Write};

const REVERSE: &str = "\x1b[7m";
const RESET: &str = "\x1b[0m";
const CLEAR_TO_EOL: &str = "\x1b[0K";

/// What the status line should say.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    /// The stream is exhausted
    AtEnd,
    /// Waiting for a keystroke
    Idle,
    /// Auto-scrolling at the given interval in seconds
    Scrolling(f64),
}

impl Status {
    fn message(self) -> String {
        match self {
            Status::AtEnd => " Scroll -- Reached end of file. ".to_string(),
            Status::Idle => " Scroll -- Press Enter to begin scrolling. ".to_string(),
            Status::Scrolling(interval) => {
                format!(" Scroll -- Scrolling every {interval:5.2} seconds. ")
            }
        }
    }
}

/// Draws and erases the reverse-video status line.
#[derive(Debug, Default)]
pub struct PromptOverlay {
    drawn_len: Option<usize>,
}

impl PromptOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible length of the currently drawn message, if any.
    pub fn drawn_len(&self) -> Option<usize> {
        self.drawn_len
    }

    /// Write the message for `status` in reverse video, leaving the cursor
    /// immediately after it.
    pub fn draw(&mut self, out: &mut impl Write, status: Status) -> io::Result<()> {
        let msg = status.message();
        write!(out, "{REVERSE}{msg}{RESET}")?;
        self.drawn_len = Some(msg.len());
        Ok(())
    }

    /// Back over the previously drawn message, one `\b` per visible
    /// character, then clear to end of line. No-op when nothing has been
    /// drawn yet.
    ///
    /// Precondition: the cursor sits immediately after the drawn prompt.
    pub fn erase(&mut self, out: &mut impl Write) -> io::Result<()> {
        let Some(len) = self.drawn_len.take() else {
            return Ok(());
        };
        for _ in 0..len {
            out.write_all(b"\x08")?;
        }
        write!(out, "{CLEAR_TO_EOL}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The three messages are constant-width: the interval field is 5.2, so
    // any interval below 100 seconds formats to exactly 5 characters.
    #[test]
    fn message_lengths_are_fixed() {
        assert_eq!(Status::AtEnd.message().len(), 32);
        assert_eq!(Status::Idle.message().len(), 43);
        assert_eq!(Status::Scrolling(2.0).message().len(), 42);
        assert_eq!(Status::Scrolling(1.92).message().len(), 42);
        assert_eq!(Status::Scrolling(34.56).message().len(), 42);
    }

    #[test]
    fn scrolling_message_formats_interval() {
        assert_eq!(
            Status::Scrolling(2.0).message(),
            " Scroll -- Scrolling every  2.00 seconds. "
        );
    }

    #[test]
    fn erase_before_first_draw_is_a_noop() {
        let mut out = Vec::new();
        let mut overlay = PromptOverlay::new();
        overlay.erase(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn erase_length_matches_the_message_it_replaces() {
        for status in [Status::AtEnd, Status::Idle, Status::Scrolling(2.0)] {
            let mut overlay = PromptOverlay::new();
            let mut out = Vec::new();
            overlay.draw(&mut out, status).unwrap();
            let expected = overlay.drawn_len().unwrap();

            out.clear();
            overlay.erase(&mut out).unwrap();
            let backspaces = out.iter().filter(|&&b| b == 0x08).count();
            assert_eq!(backspaces, expected);
            assert!(out.ends_with(b"\x1b[0K"));
            assert_eq!(overlay.drawn_len(), None);
        }
    }

    #[test]
    fn erase_uses_the_previous_length_not_the_next_message() {
        let mut overlay = PromptOverlay::new();
        let mut out = Vec::new();
        overlay.draw(&mut out, Status::Idle).unwrap();

        // The state may have moved on to end-of-file, but the idle message
        // (43 chars) is what sits on screen and must be backed over.
        out.clear();
        overlay.erase(&mut out).unwrap();
        let backspaces = out.iter().filter(|&&b| b == 0x08).count();
        assert_eq!(backspaces, 43);

        out.clear();
        overlay.draw(&mut out, Status::AtEnd).unwrap();
        assert_eq!(overlay.drawn_len(), Some(32));
    }

    #[test]
    fn erase_then_draw_leaves_one_message() {
        let mut overlay = PromptOverlay::new();
        let mut out = Vec::new();
        overlay.draw(&mut out, Status::Idle).unwrap();
        overlay.erase(&mut out).unwrap();
        overlay.draw(&mut out, Status::Scrolling(2.0)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\x1b[7m").count(), 2);
        assert!(text.ends_with(
            "\x1b[0K\x1b[7m Scroll -- Scrolling every  2.00 seconds. \x1b[0m"
        ));
    }
}
