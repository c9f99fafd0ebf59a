//! Print system-wide input events as JSON lines until Ctrl+C.
//!
//! Hooks are installed on the main thread, which then pumps messages.  The
//! listener only pushes events into a channel; a writer thread does the
//! serialization and stdout I/O so the hook callback stays fast.

#![cfg_attr(not(windows), allow(dead_code))]

use clap::Parser;

#[derive(Parser)]
#[command(name = "hookbridge-record", about = "Print captured mouse/keyboard events as JSON lines")]
struct Args {
    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Do not capture the mouse
    #[arg(long)]
    no_mouse: bool,

    /// Do not capture the keyboard
    #[arg(long)]
    no_keyboard: bool,

    /// Drop mouse-move events (buttons and wheel are still printed)
    #[arg(long)]
    skip_moves: bool,
}

#[cfg(windows)]
fn main() {
    use std::io::{self, Write};
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::thread;

    use hookbridge_core::event::InputEvent;
    use hookbridge_core::session::EventFn;
    use hookbridge_core::win32::hooks::session;
    use hookbridge_core::win32::message_loop::{post_quit_message, run_message_loop};

    let args = Args::parse();
    hookbridge_cli::init_logging(args.verbose);

    if args.no_mouse && args.no_keyboard {
        eprintln!("hookbridge-record: nothing to capture");
        std::process::exit(2);
    }

    let (tx, rx) = mpsc::channel::<InputEvent>();
    let skip_moves = args.skip_moves;
    let listener = Arc::new(EventFn(move |evt: InputEvent| {
        if skip_moves && matches!(evt, InputEvent::MouseMove { .. }) {
            return;
        }
        let _ = tx.send(evt);
    }));

    let writer = thread::Builder::new()
        .name("hookbridge-writer".to_owned())
        .spawn(move || {
            let mut stdout = io::stdout().lock();
            for evt in rx {
                match serde_json::to_string(&evt) {
                    Ok(json) => {
                        let _ = writeln!(stdout, "{json}");
                        let _ = stdout.flush();
                    }
                    Err(e) => log::error!("failed to serialize {evt:?}: {e}"),
                }
            }
        });
    let writer = match writer {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("hookbridge-record: cannot spawn writer thread: {e}");
            std::process::exit(1);
        }
    };

    let hooks = session();
    let mut started = Ok(());
    if !args.no_mouse {
        started = hooks.start_mouse(&listener);
    }
    if started.is_ok() && !args.no_keyboard {
        started = hooks.start_keyboard(&listener);
    }
    if let Err(e) = started {
        hooks.stop();
        eprintln!("hookbridge-record: {e}");
        std::process::exit(1);
    }

    if let Err(e) = ctrlc::set_handler(|| post_quit_message(0)) {
        log::warn!("cannot install Ctrl+C handler: {e}");
    }

    log::info!("recording; press Ctrl+C to stop");
    run_message_loop();

    hooks.stop();
    // Dropping the listener drops the sender and ends the writer loop.
    drop(listener);
    let _ = writer.join();
}

#[cfg(not(windows))]
fn main() {
    let args = Args::parse();
    hookbridge_cli::init_logging(args.verbose);
    eprintln!("hookbridge-record requires Windows (low-level hooks)");
    std::process::exit(1);
}
