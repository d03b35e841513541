//! Line rendering
//!
//! Turns the raw byte stream into screen lines: tabs expand to 8-column
//! stops, lines wrap at the terminal width, and a sticky end flag marks
//! stream exhaustion. Output goes straight to the sink; nothing is buffered
//! here.

use std::io::{self, Read, Write};

use crate::tty::TermSize;

/// Tab stops are every 8 columns.
pub const TAB_WIDTH: u16 = 8;

/// A forward-only byte source with a sticky end flag.
///
/// Once `ended` is set it never clears; a new stream gets a new `Source`.
/// Read errors other than `Interrupted` are treated as exhaustion.
pub struct Source<R> {
    inner: R,
    ended: bool,
}

impl<R: Read> Source<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            ended: false,
        }
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    fn next_byte(&mut self) -> Option<u8> {
        if self.ended {
            return None;
        }
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => {
                    self.ended = true;
                    return None;
                }
                Ok(_) => return Some(byte[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::debug!("read failed, treating as end of stream: {}", e);
                    self.ended = true;
                    return None;
                }
            }
        }
    }
}

/// Renders screen lines from a byte source.
pub struct LineRenderer<R> {
    source: Source<R>,
    size: TermSize,
}

impl<R: Read> LineRenderer<R> {
    pub fn new(source: R, size: TermSize) -> Self {
        Self {
            source: Source::new(source),
            size,
        }
    }

    /// Whether the source has been exhausted.
    pub fn ended(&self) -> bool {
        self.source.ended()
    }

    /// Emit up to one visual line and return the end flag.
    ///
    /// A visual line is either a run of characters ending in a newline (the
    /// newline is echoed) or enough characters/tab stops to reach the
    /// terminal width, in which case a newline is emitted and no further
    /// input is consumed. A tab whose expansion would reach or exceed the
    /// width is spent on that newline and never re-emitted. Exhaustion
    /// mid-line stops immediately without padding.
    pub fn render_line(&mut self, out: &mut impl Write) -> io::Result<bool> {
        let mut col: u16 = 0;
        while col < self.size.cols {
            match self.source.next_byte() {
                None => return Ok(true),
                Some(b'\n') => {
                    out.write_all(b"\n")?;
                    return Ok(false);
                }
                Some(b'\t') => {
                    let pad = TAB_WIDTH - col % TAB_WIDTH;
                    if col + pad >= self.size.cols {
                        out.write_all(b"\n")?;
                        return Ok(false);
                    }
                    for _ in 0..pad {
                        out.write_all(b" ")?;
                    }
                    col += pad;
                }
                Some(byte) => {
                    out.write_all(&[byte])?;
                    col += 1;
                }
            }
        }
        // Reached the right margin without a newline: wrap here.
        out.write_all(b"\n")?;
        Ok(false)
    }

    /// Emit one page: exactly (height - 1) line renders.
    ///
    /// The loop always runs its full count; once the source ends the
    /// remaining calls return immediately without output.
    pub fn render_page(&mut self, out: &mut impl Write) -> io::Result<bool> {
        let mut ended = self.source.ended();
        for _ in 1..self.size.rows {
            ended = self.render_line(out)?;
        }
        Ok(ended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;

    fn renderer(input: &str, cols: u16, rows: u16) -> LineRenderer<Cursor<Vec<u8>>> {
        LineRenderer::new(Cursor::new(input.as_bytes().to_vec()), TermSize::new(cols, rows))
    }

    fn render_one(input: &str, cols: u16) -> (String, bool) {
        let mut r = renderer(input, cols, 24);
        let mut out = Vec::new();
        let ended = r.render_line(&mut out).unwrap();
        (String::from_utf8(out).unwrap(), ended)
    }

    #[test]
    fn newline_is_echoed() {
        let (out, ended) = render_one("hello\nworld\n", 80);
        assert_eq!(out, "hello\n");
        assert!(!ended);
    }

    #[test]
    fn wraps_at_width() {
        let (out, ended) = render_one("abcdefgh", 4);
        assert_eq!(out, "abcd\n");
        assert!(!ended);
    }

    #[test]
    fn tab_pads_to_next_stop() {
        // From column 2 a tab advances to column 8.
        let (out, _) = render_one("ab\tcd\n", 10);
        assert_eq!(out, "ab      cd\n");
    }

    #[test]
    fn tab_reaching_width_wraps_and_is_spent() {
        // Tab at column 4 would land on column 8 = width: wrap instead.
        let mut r = renderer("abcd\tef\n", 8, 24);
        let mut out = Vec::new();
        r.render_line(&mut out).unwrap();
        assert_eq!(out, b"abcd\n");
        out.clear();
        // The tab is not re-emitted on the next line.
        r.render_line(&mut out).unwrap();
        assert_eq!(out, b"ef\n");
    }

    #[test]
    fn exhaustion_mid_line_stops_without_padding() {
        let (out, ended) = render_one("abc", 80);
        assert_eq!(out, "abc");
        assert!(ended);
    }

    #[test]
    fn ended_is_sticky_and_renders_become_noops() {
        let mut r = renderer("x", 80, 24);
        let mut out = Vec::new();
        assert!(r.render_line(&mut out).unwrap());
        out.clear();
        assert!(r.render_line(&mut out).unwrap());
        assert!(out.is_empty());
        assert!(r.ended());
    }

    #[test]
    fn page_renders_height_minus_one_lines() {
        let mut r = renderer("1\n2\n3\n4\n5\n", 80, 3);
        let mut out = Vec::new();
        let ended = r.render_page(&mut out).unwrap();
        assert_eq!(out, b"1\n2\n");
        assert!(!ended);
    }

    #[test]
    fn page_past_end_reports_ended() {
        let mut r = renderer("only\n", 80, 4);
        let mut out = Vec::new();
        let ended = r.render_page(&mut out).unwrap();
        assert_eq!(out, b"only\n");
        assert!(ended);
    }

    proptest! {
        // Tab/newline-free input: each rendered line holds exactly
        // min(remaining, width) characters before the wrap newline.
        #[test]
        fn line_holds_min_of_remaining_and_width(
            input in "[a-z]{0,300}",
            cols in 1u16..=120,
        ) {
            let mut r = renderer(&input, cols, 24);
            let mut out = Vec::new();
            r.render_line(&mut out).unwrap();
            let text = String::from_utf8(out).unwrap();
            let body = text.strip_suffix('\n').unwrap_or(&text);
            let expected = input.len().min(cols as usize);
            prop_assert_eq!(body.len(), expected);
        }

        // Rendering the same input twice with the same width is
        // deterministic, tabs included.
        #[test]
        fn tab_expansion_is_deterministic(
            input in "[a-z\t]{0,200}",
            cols in 1u16..=80,
        ) {
            let render_all = |input: &str| {
                let mut r = renderer(input, cols, 24);
                let mut out = Vec::new();
                while !r.render_line(&mut out).unwrap() {}
                out
            };
            prop_assert_eq!(render_all(&input), render_all(&input));
        }
    }
}
