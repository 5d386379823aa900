//! Commands typed at the console prompt.

use crate::error::ChatAppError;

use common::ErrorLocation;

use std::panic::Location;
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  /init            initialize the local node
  /peer <id>       set the recipient of the next message
  /send <content>  send to the recipient set with /peer
  /help            show this help
  /quit            exit
Any line not starting with '/' is sent as with /send.";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Init,
    /// Set the compose form's peer id.
    Peer(String),
    /// Set the compose form's content and send it.
    Send(String),
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = ChatAppError;

    /// Parse a line. Arguments are taken verbatim apart from the single
    /// separating space, so empty ids and empty content are accepted.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);

        let Some(command) = line.strip_prefix('/') else {
            return Ok(ShellCommand::Send(line.to_string()));
        };

        let (name, argument) = match command.split_once(' ') {
            Some((name, argument)) => (name, argument),
            None => (command, ""),
        };

        match name {
            "init" => Ok(ShellCommand::Init),
            "peer" => Ok(ShellCommand::Peer(argument.trim().to_string())),
            "send" => Ok(ShellCommand::Send(argument.to_string())),
            "help" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(ChatAppError::Input {
                message: format!("Unknown command: /{other} (try /help)"),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
