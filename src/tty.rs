//! Control-terminal glue
//!
//! Raw-mode setup/restore, window-size query, keystroke polling, and the
//! interrupt flag. All POSIX access goes through `nix`. The keyboard is read
//! from `/dev/tty`, a separate handle from whatever stream is being paged,
//! so paging stdin still leaves the keyboard usable.

use std::fs::File;
use std::os::fd::BorrowedFd;
use std::os::unix::io::AsRawFd;
use std::sync::atomic::{AtomicBool, Ordering};

use nix::libc;
use nix::poll::{poll, PollFd, PollFlags};
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices};
use nix::unistd::read;

use crate::error::{Error, Result};

/// Terminal dimensions, captured once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub cols: u16,
    pub rows: u16,
}

impl TermSize {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

/// Window size of the output terminal, falling back to 80x24 when the
/// ioctl fails or reports zero.
pub fn term_size() -> TermSize {
    let mut ws = nix::pty::Winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };

    // SAFETY: TIOCGWINSZ writes into a valid winsize struct
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        TermSize::new(ws.ws_col, ws.ws_row)
    } else {
        TermSize::new(80, 24)
    }
}

/// The keyboard side of the pager: `/dev/tty` opened independently of the
/// paged data stream.
pub struct ControlTty {
    file: File,
}

impl ControlTty {
    pub fn open() -> Result<Self> {
        let file = File::open("/dev/tty").map_err(Error::OpenTty)?;
        Ok(Self { file })
    }

    /// Wait up to `timeout_ms` for a keystroke (-1 blocks indefinitely).
    ///
    /// Returns `Ok(true)` when a byte is readable, `Ok(false)` on timeout.
    /// EINTR is surfaced so the caller can check the interrupt flag.
    pub fn poll_key(&self, timeout_ms: i32) -> nix::Result<bool> {
        // SAFETY: the fd is valid for the lifetime of this ControlTty
        let borrowed_fd = unsafe { BorrowedFd::borrow_raw(self.file.as_raw_fd()) };
        let mut fds = [PollFd::new(&borrowed_fd, PollFlags::POLLIN)];
        let n = poll(&mut fds, timeout_ms)?;
        Ok(n > 0
            && fds[0]
                .revents()
                .is_some_and(|r| r.contains(PollFlags::POLLIN)))
    }

    /// Read one raw byte; `None` on end of the control terminal.
    pub fn read_key(&self) -> nix::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match read(self.file.as_raw_fd(), &mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }

    fn file(&self) -> &File {
        &self.file
    }
}

/// RAII guard: puts the control terminal in raw, no-echo mode and restores
/// the original settings on drop, from any exit path.
pub struct RawModeGuard<'a> {
    file: &'a File,
    original: termios::Termios,
}

impl<'a> RawModeGuard<'a> {
    pub fn new(tty: &'a ControlTty) -> Result<Self> {
        let original = termios::tcgetattr(tty.file())?;
        let mut raw = original.clone();

        // No echo, no line buffering, one byte per read. ISIG stays set so
        // Ctrl-C still raises SIGINT.
        raw.local_flags.remove(LocalFlags::ICANON);
        raw.local_flags.remove(LocalFlags::ECHO);
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;

        termios::tcsetattr(tty.file(), SetArg::TCSANOW, &raw)?;

        Ok(Self {
            file: tty.file(),
            original,
        })
    }
}

impl Drop for RawModeGuard<'_> {
    fn drop(&mut self) {
        let _ = termios::tcsetattr(self.file, SetArg::TCSANOW, &self.original);
    }
}

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_interrupt(_signum: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Install the SIGINT handler. The handler only sets a flag; the event loop
/// notices it (poll returns EINTR) and unwinds normally, so the raw-mode
/// guard restores terminal settings before exit.
pub fn install_interrupt_handler() -> Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(handle_interrupt),
        SaFlags::empty(),
        SigSet::empty(),
    );
    // SAFETY: the handler is async-signal-safe (a single atomic store)
    unsafe { signal::sigaction(Signal::SIGINT, &action)? };
    Ok(())
}

/// Whether SIGINT has been received.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_size_is_never_zero() {
        let size = term_size();
        assert!(size.cols > 0);
        assert!(size.rows > 0);
    }

    #[test]
    fn interrupt_flag_starts_clear() {
        assert!(!interrupted());
    }
}
