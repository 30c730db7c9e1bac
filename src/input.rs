//! Console input.
//!
//! The headless desktop has no mouse buttons or key focus, so input arrives
//! as lines on stdin and is mapped onto [`PetCommand`]s:
//!
//! | Line            | Command                        |
//! |-----------------|--------------------------------|
//! | `l`, `click`    | primary click                  |
//! | `r`, `right`    | secondary click (quits)        |
//! | `quit`          | quit                           |
//! | `force <name>`  | force a behavior               |
//! | any single char | key press (`q`/`Q` quits)      |

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use log::{debug, warn};

use crate::app::commands::PetCommand;
use crate::fsm::Behavior;

/// Map one input line to a command.  Blank or unknown lines yield `None`.
pub fn parse_line(line: &str) -> Option<PetCommand> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let first = words.next()?;

    match first {
        "l" | "click" => Some(PetCommand::PrimaryClick),
        "r" | "right" => Some(PetCommand::SecondaryClick),
        "quit" | "exit" => Some(PetCommand::Quit),
        "force" => {
            let name = words.next()?;
            let behavior = Behavior::from_name(name);
            if behavior.is_none() {
                warn!("unknown behavior '{name}'");
            }
            behavior.map(PetCommand::ForceBehavior)
        }
        _ => {
            let mut chars = first.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(PetCommand::KeyPress(c)),
                _ => {
                    debug!("ignoring input '{line}'");
                    None
                }
            }
        }
    }
}

/// Read stdin on a background thread.  The channel closes at end of input.
pub fn spawn_stdin_reader() -> Receiver<PetCommand> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if let Some(cmd) = parse_line(&line) {
                if tx.send(cmd).is_err() {
                    break;
                }
            }
        }
        debug!("stdin closed");
    });
    rx
}
