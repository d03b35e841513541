//! scroll — a forward-only terminal pager with timer-driven auto-scroll
//!
//! Pages each file argument in turn, or stdin when no arguments are given.
//! The keyboard is read from `/dev/tty` so paging stdin still works.

use std::fs::File;
use std::io::{self, Read};
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scroll::session::{Flow, Session};
use scroll::tty::{self, ControlTty, RawModeGuard, TermSize};
use scroll::{event_loop, Error, Result};

fn main() -> ExitCode {
    // Log to stderr; stdout belongs to the pager display.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("scroll: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    tty::install_interrupt_handler()?;

    let size = tty::term_size();
    tracing::debug!(cols = size.cols, rows = size.rows, "terminal size");

    if args.is_empty() {
        let stdin = io::stdin();
        page_stream(stdin.lock(), size)?;
        return Ok(());
    }

    for path in &args {
        let file = File::open(path).map_err(|source| Error::OpenFile {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path, "paging file");
        if page_stream(file, size)? == Flow::Shutdown {
            break;
        }
    }
    Ok(())
}

/// Run one full pager session over `source`. The raw-mode guard restores
/// the original terminal settings on every exit path, interrupt included.
fn page_stream<R: Read>(source: R, size: TermSize) -> Result<Flow> {
    let ctty = ControlTty::open()?;
    let _raw = RawModeGuard::new(&ctty)?;

    let mut session = Session::new(source, size, io::stdout().lock());
    let flow = event_loop::run(&mut session, &ctty)?;
    drop(session);

    // Leave the cursor on a fresh line below the prompt.
    println!();
    Ok(flow)
}
