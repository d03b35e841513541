//! Pager session
//!
//! One session pages one stream. It owns the line renderer, the prompt
//! overlay, the scroll state, and the output sink, and consumes a serialized
//! stream of events; because keystrokes and timer ticks arrive through the
//! same `handle_event` surface, a timer-driven render can never interleave
//! with a keystroke-driven one.
//!
//! Every render follows the same protocol: erase the old prompt, emit the
//! text, draw the prompt for the new state. The overlay's erase is a no-op
//! before the first draw, which covers the initial page.

use std::io::{Read, Write};
use std::time::Duration;

use crate::input::{self, Action};
use crate::prompt::{PromptOverlay, Status};
use crate::render::LineRenderer;
use crate::scroll::{Mode, ScrollState};
use crate::tty::TermSize;
use crate::Result;

/// An event delivered to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// One raw byte from the control terminal
    Key(u8),
    /// The auto-scroll timer fired
    Tick,
    /// External termination request
    Shutdown,
}

/// What the event loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep delivering events
    Continue,
    /// `q` (or control-terminal EOF): done with this stream
    Quit,
    /// Interrupted: done with the whole run
    Shutdown,
}

/// One paging session over a single stream.
pub struct Session<R, W> {
    renderer: LineRenderer<R>,
    overlay: PromptOverlay,
    scroll: ScrollState,
    out: W,
    timer_changed: bool,
}

impl<R: Read, W: Write> Session<R, W> {
    pub fn new(source: R, size: TermSize, out: W) -> Self {
        Self {
            renderer: LineRenderer::new(source, size),
            overlay: PromptOverlay::new(),
            scroll: ScrollState::new(),
            out,
            timer_changed: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.scroll.mode()
    }

    /// Whether the paged stream is exhausted.
    pub fn ended(&self) -> bool {
        self.renderer.ended()
    }

    /// Timer period the event loop should honor; `None` means disarmed.
    pub fn timer_period(&self) -> Option<Duration> {
        self.scroll.period()
    }

    /// Borrow the output sink.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// True once after any event that armed, re-armed, or disarmed the
    /// timer. The event loop uses this to recompute its deadline.
    pub fn take_timer_changed(&mut self) -> bool {
        std::mem::take(&mut self.timer_changed)
    }

    /// Render the first page and the initial prompt.
    pub fn start(&mut self) -> Result<()> {
        self.page_forward()?;
        self.out.flush()?;
        Ok(())
    }

    /// Apply one event and flush the output.
    pub fn handle_event(&mut self, event: Event) -> Result<Flow> {
        let flow = match event {
            Event::Shutdown => {
                tracing::info!("shutdown requested");
                Flow::Shutdown
            }
            Event::Tick => {
                self.tick()?;
                Flow::Continue
            }
            Event::Key(byte) => self.handle_key(byte)?,
        };
        self.out.flush()?;
        Ok(flow)
    }

    fn handle_key(&mut self, byte: u8) -> Result<Flow> {
        for &action in input::dispatch(byte, self.scroll.mode()) {
            match action {
                Action::Quit => return Ok(Flow::Quit),
                Action::StopAuto => self.stop_auto()?,
                Action::StartAuto => self.start_auto(1.0)?,
                Action::SpeedUp => self.adjust_speed(input::SPEED_UP)?,
                Action::SlowDown => self.adjust_speed(input::SLOW_DOWN)?,
                Action::PageForward => self.page_forward()?,
            }
        }
        Ok(Flow::Continue)
    }

    /// A timer tick renders one line. Ticks that race a just-stopped timer
    /// are dropped.
    fn tick(&mut self) -> Result<()> {
        if self.scroll.mode() != Mode::Auto {
            return Ok(());
        }
        self.overlay.erase(&mut self.out)?;
        self.renderer.render_line(&mut self.out)?;
        self.draw_prompt()
    }

    fn page_forward(&mut self) -> Result<()> {
        self.overlay.erase(&mut self.out)?;
        self.renderer.render_page(&mut self.out)?;
        self.draw_prompt()
    }

    fn start_auto(&mut self, multiplier: f64) -> Result<()> {
        self.overlay.erase(&mut self.out)?;
        self.scroll.start_auto(multiplier);
        self.timer_changed = true;
        self.draw_prompt()
    }

    fn adjust_speed(&mut self, multiplier: f64) -> Result<()> {
        self.overlay.erase(&mut self.out)?;
        self.scroll.adjust_speed(multiplier);
        self.timer_changed = true;
        self.draw_prompt()
    }

    fn stop_auto(&mut self) -> Result<()> {
        self.overlay.erase(&mut self.out)?;
        self.scroll.stop_auto();
        self.timer_changed = true;
        self.draw_prompt()
    }

    fn draw_prompt(&mut self) -> Result<()> {
        let status = if self.renderer.ended() {
            Status::AtEnd
        } else {
            match self.scroll.mode() {
                Mode::Idle => Status::Idle,
                Mode::Auto => Status::Scrolling(self.scroll.interval()),
            }
        };
        self.overlay.draw(&mut self.out, status)?;
        Ok(())
    }
}
