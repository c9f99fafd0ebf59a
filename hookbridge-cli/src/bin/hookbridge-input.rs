//! Standalone CLI tool for sending input events.

#![cfg_attr(not(windows), allow(dead_code))]

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "hookbridge-input", about = "Send keyboard/mouse input via Win32 SendInput")]
struct Args {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Button {
    Left,
    Right,
    Middle,
}

impl Button {
    fn id(self) -> i32 {
        match self {
            Button::Left => 0,
            Button::Right => 1,
            Button::Middle => 2,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Move cursor to coordinates
    Move {
        /// X coordinate
        x: i32,
        /// Y coordinate
        y: i32,
    },
    /// Glide the cursor from its current position to coordinates
    Glide {
        x: i32,
        y: i32,
        /// Number of intermediate moves
        #[arg(long, default_value_t = 20)]
        steps: i32,
        /// Pause between moves in milliseconds
        #[arg(long, default_value_t = 5)]
        delay_ms: i32,
    },
    /// Click a mouse button at the current position
    Click {
        #[arg(short, long, value_enum, default_value = "left")]
        button: Button,
    },
    /// Press or release a mouse button
    Button {
        #[arg(value_enum)]
        button: Button,
        /// Release instead of press
        #[arg(long)]
        up: bool,
    },
    /// Scroll the vertical wheel (120 = one notch away from the user)
    Wheel {
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
    /// Press and release a virtual key code
    Key {
        /// Virtual key code (hex, e.g. 0x0D for Enter)
        #[arg(value_parser = parse_hex_or_dec)]
        vk_code: u16,
    },
    /// Press a virtual key code without releasing it
    KeyDown {
        #[arg(value_parser = parse_hex_or_dec)]
        vk_code: u16,
    },
    /// Release a virtual key code
    KeyUp {
        #[arg(value_parser = parse_hex_or_dec)]
        vk_code: u16,
    },
}

fn parse_hex_or_dec(s: &str) -> Result<u16, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16).map_err(|e| e.to_string())
    } else {
        s.parse::<u16>().map_err(|e| e.to_string())
    }
}

#[cfg(windows)]
fn main() {
    use hookbridge_core::inject::Injector;
    use hookbridge_core::win32::send::SendInputSink;

    let args = Args::parse();
    hookbridge_cli::init_logging(args.verbose);
    let injector = Injector::new(SendInputSink);

    let (result, summary) = match args.command {
        Command::Move { x, y } => (injector.move_mouse(x, y), format!("moved cursor to {x},{y}")),
        Command::Glide { x, y, steps, delay_ms } => (
            injector.move_mouse_smooth(x, y, steps, delay_ms),
            format!("glided to {x},{y} in {steps} steps"),
        ),
        Command::Click { button } => (
            injector.mouse_click(button.id()),
            format!("clicked button {}", button.id()),
        ),
        Command::Button { button, up } => {
            let result = if up {
                injector.mouse_button_up(button.id())
            } else {
                injector.mouse_button_down(button.id())
            };
            let verb = if up { "released" } else { "pressed" };
            (result, format!("{verb} button {}", button.id()))
        }
        Command::Wheel { delta } => (injector.mouse_wheel(delta), format!("scrolled {delta}")),
        Command::Key { vk_code } => (injector.key_press(vk_code), format!("sent key 0x{vk_code:04X}")),
        Command::KeyDown { vk_code } => {
            (injector.key_down(vk_code), format!("pressed key 0x{vk_code:04X}"))
        }
        Command::KeyUp { vk_code } => {
            (injector.key_up(vk_code), format!("released key 0x{vk_code:04X}"))
        }
    };

    match result {
        Ok(()) => println!("{summary}"),
        Err(e) => {
            eprintln!("hookbridge-input: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(windows))]
fn main() {
    let args = Args::parse();
    hookbridge_cli::init_logging(args.verbose);
    eprintln!("hookbridge-input requires Windows (SendInput)");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_or_dec() {
        assert_eq!(parse_hex_or_dec("0x0D"), Ok(13));
        assert_eq!(parse_hex_or_dec("0X41"), Ok(65));
        assert_eq!(parse_hex_or_dec("32"), Ok(32));
        assert!(parse_hex_or_dec("0xZZ").is_err());
    }

    #[test]
    fn test_wheel_accepts_negative_delta() {
        let args = Args::try_parse_from(["hookbridge-input", "wheel", "-120"]).unwrap();
        assert!(matches!(args.command, Command::Wheel { delta: -120 }));
    }

    #[test]
    fn test_glide_defaults() {
        let args = Args::try_parse_from(["hookbridge-input", "glide", "10", "20"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Glide { x: 10, y: 20, steps: 20, delay_ms: 5 }
        ));
    }
}
