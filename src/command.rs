//! Line protocol spoken between `modal-loader-ctl` and the daemon.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::CommandError;
use crate::overlay::CloseReason;

pub fn socket_path() -> PathBuf {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(runtime_dir).join("modal-loader.sock")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Click an element carrying these attributes.
    Click(BTreeMap<String, String>),
    Close(CloseReason),
    State,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        match verb {
            "click" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingPayload);
                }
                let attributes = serde_json::from_str(rest)?;
                Ok(Command::Click(attributes))
            }
            "close" if rest.is_empty() => Ok(Command::Close(CloseReason::Dismiss)),
            "close" => CloseReason::parse(rest)
                .map(Command::Close)
                .ok_or_else(|| CommandError::UnknownReason(rest.to_string())),
            "state" if rest.is_empty() => Ok(Command::State),
            _ => Err(CommandError::Unknown(line.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_click() {
        let cmd = Command::parse(r#"click {"class": "load-in-modal", "href": "/about"}"#).unwrap();
        let Command::Click(attrs) = cmd else {
            panic!("expected click");
        };
        assert_eq!(attrs.get("class").map(String::as_str), Some("load-in-modal"));
        assert_eq!(attrs.get("href").map(String::as_str), Some("/about"));
    }

    #[test]
    fn click_requires_string_object() {
        assert!(matches!(Command::parse("click"), Err(CommandError::MissingPayload)));
        assert!(matches!(
            Command::parse(r#"click {"href": 3}"#),
            Err(CommandError::InvalidPayload(_))
        ));
        assert!(matches!(
            Command::parse(r#"click ["/about"]"#),
            Err(CommandError::InvalidPayload(_))
        ));
    }

    #[test]
    fn parse_close() {
        assert_eq!(Command::parse("close").unwrap(), Command::Close(CloseReason::Dismiss));
        assert_eq!(
            Command::parse("close escape\n").unwrap(),
            Command::Close(CloseReason::Escape)
        );
        assert!(matches!(
            Command::parse("close swipe"),
            Err(CommandError::UnknownReason(ref r)) if r == "swipe"
        ));
    }

    #[test]
    fn parse_state_and_unknown() {
        assert_eq!(Command::parse("  state ").unwrap(), Command::State);
        assert!(matches!(Command::parse("state now"), Err(CommandError::Unknown(_))));
        assert!(matches!(Command::parse("toggle"), Err(CommandError::Unknown(_))));
        assert!(matches!(Command::parse(""), Err(CommandError::Unknown(_))));
    }
}
