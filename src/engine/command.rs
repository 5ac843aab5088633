//! Messages crossing the engine boundary

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::EngineError;

/// Inbound command accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Start,
    Stop,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => write!(f, "start"),
            Command::Stop => write!(f, "stop"),
        }
    }
}

impl FromStr for Command {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Command::Start),
            "stop" => Ok(Command::Stop),
            _ => Err(EngineError::UnrecognizedCommand(s.to_string())),
        }
    }
}

/// Outbound notification emitted by the engine.
///
/// A tick carries nothing but its tag; the consumer keeps its own countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands_loosely() {
        assert_eq!("start".parse::<Command>(), Ok(Command::Start));
        assert_eq!(" STOP \n".parse::<Command>(), Ok(Command::Stop));
    }

    #[test]
    fn rejects_unknown_commands() {
        assert_eq!(
            "RESET".parse::<Command>(),
            Err(EngineError::UnrecognizedCommand("RESET".to_string()))
        );
        assert!("".parse::<Command>().is_err());
    }

    #[test]
    fn command_display_matches_parse() {
        for command in [Command::Start, Command::Stop] {
            assert_eq!(command.to_string().parse::<Command>(), Ok(command));
        }
    }

    #[test]
    fn tick_serializes_as_tagged_message() {
        let json = serde_json::to_string(&Notification::Tick).unwrap();
        assert_eq!(json, r#"{"type":"tick"}"#);

        let parsed: Notification = serde_json::from_str(r#"{"type":"tick"}"#).unwrap();
        assert_eq!(parsed, Notification::Tick);
    }
}
