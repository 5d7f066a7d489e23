use crate::dnd::{AriaLive, ColumnDropPlacement, DEFAULT_SCREEN_READER_INSTRUCTIONS};
use crate::domain::BoardConfig;
use crate::error::{MemosError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Drag and drop behaviour and accessibility settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DndConfig {
    pub column_drop: ColumnDropPlacement,
    pub aria_live: AriaLive,
    pub screen_reader_instructions: String,
}

impl Default for DndConfig {
    fn default() -> Self {
        Self {
            column_drop: ColumnDropPlacement::Start,
            aria_live: AriaLive::Assertive,
            screen_reader_instructions: DEFAULT_SCREEN_READER_INSTRUCTIONS.to_string(),
        }
    }
}

/// Paths of the authentication pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub login_path: String,
    pub otp_path: String,
    pub profile_setup_path: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            login_path: "/auth/login".into(),
            otp_path: "/auth/otp".into(),
            profile_setup_path: "/auth/profile/setup".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub dnd: DndConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

impl Config {
    /// Reads overrides from `MEMOS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from defaults plus whatever `lookup` returns for
    /// each `MEMOS_*` key. Invalid values are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("MEMOS_BOARD_NAME") {
            config.board.name = name;
        }
        if let Some(value) = lookup("MEMOS_COLUMN_DROP") {
            config.dnd.column_drop = ColumnDropPlacement::from_str(&value)?;
        }
        if let Some(value) = lookup("MEMOS_ARIA_LIVE") {
            config.dnd.aria_live = AriaLive::from_str(&value)?;
        }
        if let Some(path) = lookup("MEMOS_LOGIN_PATH") {
            config.identity.login_path = parse_path("MEMOS_LOGIN_PATH", path)?;
        }
        if let Some(path) = lookup("MEMOS_OTP_PATH") {
            config.identity.otp_path = parse_path("MEMOS_OTP_PATH", path)?;
        }
        if let Some(path) = lookup("MEMOS_PROFILE_SETUP_PATH") {
            config.identity.profile_setup_path = parse_path("MEMOS_PROFILE_SETUP_PATH", path)?;
        }

        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn parse_path(key: &str, path: String) -> Result<String> {
    if path.starts_with('/') {
        Ok(path)
    } else {
        Err(MemosError::ConfigError(format!(
            "{} must be an absolute path, got '{}'",
            key, path
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.dnd.column_drop, ColumnDropPlacement::Start);
        assert_eq!(config.identity.otp_path, "/auth/otp");
        assert_eq!(config.board.columns.len(), 5);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("MEMOS_BOARD_NAME", "Sprint 12"),
            ("MEMOS_COLUMN_DROP", "end"),
            ("MEMOS_ARIA_LIVE", "polite"),
            ("MEMOS_OTP_PATH", "/login/code"),
        ]))
        .unwrap();

        assert_eq!(config.board.name, "Sprint 12");
        assert_eq!(config.dnd.column_drop, ColumnDropPlacement::End);
        assert_eq!(config.dnd.aria_live, AriaLive::Polite);
        assert_eq!(config.identity.otp_path, "/login/code");
        assert_eq!(config.identity.login_path, "/auth/login");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Config::from_lookup(lookup(&[("MEMOS_COLUMN_DROP", "middle")])).is_err());
        assert!(Config::from_lookup(lookup(&[("MEMOS_ARIA_LIVE", "loud")])).is_err());

        let err = Config::from_lookup(lookup(&[("MEMOS_LOGIN_PATH", "auth/login")])).unwrap_err();
        assert!(err.to_string().contains("MEMOS_LOGIN_PATH"));
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json(
            r#"{"dnd": {"column_drop": "end", "aria_live": "off", "screen_reader_instructions": "Drag"}}"#,
        )
        .unwrap();

        assert_eq!(config.dnd.column_drop, ColumnDropPlacement::End);
        assert_eq!(config.dnd.aria_live, AriaLive::Off);
        assert_eq!(config.board, BoardConfig::default());
    }

    #[test]
    fn test_partial_nested_json() {
        let config = Config::from_json(
            r#"{"dnd": {"column_drop": "end"}, "identity": {"otp_path": "/code"}, "board": {"name": "Ops"}}"#,
        )
        .unwrap();

        assert_eq!(config.dnd.column_drop, ColumnDropPlacement::End);
        assert_eq!(config.dnd.aria_live, AriaLive::Assertive);
        assert_eq!(
            config.dnd.screen_reader_instructions,
            DEFAULT_SCREEN_READER_INSTRUCTIONS
        );
        assert_eq!(config.identity.otp_path, "/code");
        assert_eq!(config.identity.login_path, "/auth/login");
        assert_eq!(config.board.name, "Ops");
        assert_eq!(config.board.columns.len(), 5);
    }
}
