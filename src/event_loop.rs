//! Serial event loop
//!
//! Multiplexes keystrokes and the auto-scroll timer over one thread:
//! `poll(2)` on the control terminal with a timeout derived from the next
//! timer deadline. The interrupt flag is checked every iteration, and poll
//! returning EINTR wakes the loop when a signal lands mid-wait.
//!
//! The timer deadline is recomputed here, never inside a timer callback:
//! after each tick it advances by one period, and whenever a keystroke arms,
//! re-arms, or disarms the timer the deadline is rebuilt from the session's
//! current period (initial delay equals the repeat interval).

use std::io::{Read, Write};
use std::time::Instant;

use nix::errno::Errno;

use crate::session::{Event, Flow, Session};
use crate::tty::{self, ControlTty};
use crate::Result;

/// Drive one session until `q`, control-terminal EOF, or interrupt.
pub fn run<R: Read, W: Write>(session: &mut Session<R, W>, tty: &ControlTty) -> Result<Flow> {
    session.start()?;
    let mut deadline: Option<Instant> = None;

    loop {
        if tty::interrupted() {
            return session.handle_event(Event::Shutdown);
        }

        // Fire a due timer before blocking again.
        if let Some(when) = deadline {
            if Instant::now() >= when {
                let flow = session.handle_event(Event::Tick)?;
                session.take_timer_changed();
                deadline = session.timer_period().map(|p| Instant::now() + p);
                if flow != Flow::Continue {
                    return Ok(flow);
                }
                continue;
            }
        }

        let timeout_ms = match deadline {
            Some(when) => {
                let remaining = when.saturating_duration_since(Instant::now());
                remaining.as_millis().min(i32::MAX as u128) as i32
            }
            None => -1,
        };

        match tty.poll_key(timeout_ms) {
            Ok(true) => match tty.read_key() {
                Ok(Some(byte)) => {
                    let flow = session.handle_event(Event::Key(byte))?;
                    if session.take_timer_changed() {
                        deadline = session.timer_period().map(|p| Instant::now() + p);
                    }
                    if flow != Flow::Continue {
                        return Ok(flow);
                    }
                }
                Ok(None) => {
                    // Control terminal closed under us; treat like quit.
                    tracing::debug!("control terminal EOF");
                    return Ok(Flow::Quit);
                }
                Err(Errno::EINTR) => continue,
                Err(e) => return Err(e.into()),
            },
            Ok(false) => {
                // Timeout; the loop top fires the deadline.
            }
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(e.into()),
        }
    }
}
