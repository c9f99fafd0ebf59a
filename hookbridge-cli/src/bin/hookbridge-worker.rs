//! JSON-RPC IPC worker for synthetic input.
//!
//! Reads line-delimited JSON requests from stdin, dispatches them to the
//! `SendInput` injector, writes JSON responses to stdout.  Requests run one
//! at a time, so a long `move_mouse_smooth` delays the next request.

use clap::Parser;

#[derive(Parser)]
#[command(name = "hookbridge-worker", about = "hookbridge input injection worker process")]
struct Args {
    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[cfg(windows)]
fn main() {
    use std::io::{self, BufRead, Write};

    use hookbridge_cli::rpc;
    use hookbridge_core::inject::Injector;
    use hookbridge_core::win32::send::SendInputSink;

    let args = Args::parse();
    hookbridge_cli::init_logging(args.verbose);

    let injector = Injector::new(SendInputSink);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    log::info!("hookbridge-worker: ready");

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("stdin read error: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let resp = rpc::handle_line(&injector, &line);
        if let Ok(json) = serde_json::to_string(&resp) {
            let _ = writeln!(stdout, "{json}");
        } else {
            // Serialization failed -- send minimal error response.
            let _ = writeln!(
                stdout,
                r#"{{"id":{},"error":"response serialization failed"}}"#,
                resp.id
            );
        }
        let _ = stdout.flush();
    }
}

#[cfg(not(windows))]
fn main() {
    let args = Args::parse();
    hookbridge_cli::init_logging(args.verbose);
    log::error!("hookbridge-worker requires Windows (SendInput)");
    std::process::exit(1);
}
