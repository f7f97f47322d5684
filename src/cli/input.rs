//! Keyboard input for the interactive timer.
//!
//! Commands are read one line at a time from stdin:
//! - `s`: start/stop
//! - `b`: break / +5 min
//! - empty line or `ok`: acknowledge a completion
//! - `q`: quit

use std::io::{self, BufRead};
use std::thread;

use tokio::sync::mpsc;
use tracing::debug;

use crate::host::{Action, DriverCommand};

/// Parses one input line into a driver command.
///
/// Returns `None` for unrecognised input.
pub fn parse_command(line: &str) -> Option<DriverCommand> {
    match line.trim().to_lowercase().as_str() {
        "" | "ok" => Some(DriverCommand::Acknowledge),
        "s" | "start" | "stop" => Some(DriverCommand::Action(Action::StartStop)),
        "b" | "break" | "+" | "+5" => Some(DriverCommand::Action(Action::BreakExtend)),
        "q" | "quit" | "exit" => Some(DriverCommand::Quit),
        _ => None,
    }
}

/// Forwards parsed commands from `reader` until EOF or the driver goes away.
///
/// Ends with a `Quit` on EOF so the driver loop stops too. Blocks the
/// calling thread.
pub fn forward_commands<R>(reader: R, commands: mpsc::UnboundedSender<DriverCommand>)
where
    R: BufRead,
{
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                debug!("Failed to read input: {}", e);
                break;
            }
        };

        match parse_command(&line) {
            Some(command) => {
                if commands.send(command).is_err() {
                    return;
                }
            }
            None => debug!("Ignoring unknown input: {:?}", line),
        }
    }
    let _ = commands.send(DriverCommand::Quit);
}

/// Spawns a thread forwarding stdin commands to the driver.
///
/// Stdin is read on a plain thread so a pending read never holds up runtime
/// shutdown.
pub fn spawn_stdin_reader(
    commands: mpsc::UnboundedSender<DriverCommand>,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || forward_commands(io::stdin().lock(), commands))
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_actions() {
            assert_eq!(
                parse_command("s"),
                Some(DriverCommand::Action(Action::StartStop))
            );
            assert_eq!(
                parse_command(" B \n"),
                Some(DriverCommand::Action(Action::BreakExtend))
            );
        }

        #[test]
        fn test_parse_acknowledge() {
            assert_eq!(parse_command(""), Some(DriverCommand::Acknowledge));
            assert_eq!(parse_command("OK"), Some(DriverCommand::Acknowledge));
        }

        #[test]
        fn test_parse_quit() {
            assert_eq!(parse_command("q"), Some(DriverCommand::Quit));
        }

        #[test]
        fn test_parse_unknown() {
            assert_eq!(parse_command("pause"), None);
        }
    }

    mod forward_tests {
        use super::*;

        #[test]
        fn test_forward_ends_with_quit() {
            let input: &[u8] = b"s\nxyz\nb\n";
            let (tx, mut rx) = mpsc::unbounded_channel();

            forward_commands(input, tx);

            assert_eq!(
                rx.try_recv().ok(),
                Some(DriverCommand::Action(Action::StartStop))
            );
            assert_eq!(
                rx.try_recv().ok(),
                Some(DriverCommand::Action(Action::BreakExtend))
            );
            assert_eq!(rx.try_recv().ok(), Some(DriverCommand::Quit));
            assert!(rx.try_recv().is_err());
        }

        #[test]
        fn test_forward_stops_when_driver_gone() {
            let input: &[u8] = b"s\ns\n";
            let (tx, rx) = mpsc::unbounded_channel();
            drop(rx);

            forward_commands(input, tx);
        }
    }
}
