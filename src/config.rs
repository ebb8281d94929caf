use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::Error;

pub const API_KEY_VAR: &str = "TRELLO_API_KEY";
pub const SECRET_VAR: &str = "TRELLO_SECRET";

/// API key and secret, resolved once at startup and immutable after that.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    /// Required at startup like the key; Trello only needs it for OAuth1
    /// signing, which the token flow used here never performs.
    #[allow(dead_code)]
    pub secret: String,
}

impl Credentials {
    /// Resolve both values from the process environment, falling back to a
    /// `.env` file in the current directory for whichever is missing.
    pub fn resolve() -> Result<Self> {
        Self::resolve_from(
            std::env::var(API_KEY_VAR).ok(),
            std::env::var(SECRET_VAR).ok(),
            Path::new(".env"),
        )
    }

    fn resolve_from(
        env_api_key: Option<String>,
        env_secret: Option<String>,
        env_file: &Path,
    ) -> Result<Self> {
        let mut api_key = env_api_key;
        let mut secret = env_secret;

        if (api_key.is_none() || secret.is_none()) && env_file.exists() {
            let contents = std::fs::read_to_string(env_file)
                .with_context(|| format!("Failed to read {}", env_file.display()))?;
            let mut from_file = parse_env_file(&contents);
            api_key = api_key.or_else(|| from_file.remove(API_KEY_VAR));
            secret = secret.or_else(|| from_file.remove(SECRET_VAR));
        }

        let api_key = api_key.ok_or(Error::MissingCredential(API_KEY_VAR))?;
        let secret = secret.ok_or(Error::MissingCredential(SECRET_VAR))?;
        Ok(Credentials { api_key, secret })
    }
}

/// Parse `NAME=value` lines, splitting at the first `=` only. Lines without
/// an `=` are ignored.
fn parse_env_file(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .filter_map(|line| {
            let (name, value) = line.trim().split_once('=')?;
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

/// Fixed location of the persisted session file.
pub fn session_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".trello-move")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_env(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join(".env");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn env_values_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_env(
            dir.path(),
            "TRELLO_API_KEY=file-key\nTRELLO_SECRET=file-secret\n",
        );

        let creds = Credentials::resolve_from(
            Some("env-key".into()),
            Some("env-secret".into()),
            &file,
        )
        .unwrap();
        assert_eq!(creds.api_key, "env-key");
        assert_eq!(creds.secret, "env-secret");
    }

    #[test]
    fn file_fills_in_missing_values() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_env(dir.path(), "TRELLO_SECRET=file-secret\n");

        let creds = Credentials::resolve_from(Some("env-key".into()), None, &file).unwrap();
        assert_eq!(creds.api_key, "env-key");
        assert_eq!(creds.secret, "file-secret");
    }

    #[test]
    fn missing_key_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_env(dir.path(), "TRELLO_SECRET=s\n");

        let err = Credentials::resolve_from(None, None, &file).unwrap_err();
        assert_eq!(
            err.to_string(),
            "TRELLO_API_KEY not found in .env file or environment variables"
        );
    }

    #[test]
    fn missing_secret_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_env(dir.path(), "TRELLO_API_KEY=k\n");

        let err = Credentials::resolve_from(None, None, &file).unwrap_err();
        assert!(err.to_string().starts_with("TRELLO_SECRET not found"));
    }

    #[test]
    fn missing_file_is_fatal_when_env_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".env");

        let err = Credentials::resolve_from(None, None, &file).unwrap_err();
        assert!(err.to_string().contains("TRELLO_API_KEY"));
    }

    #[test]
    fn env_file_splits_at_first_equals_only() {
        let parsed = parse_env_file("TRELLO_API_KEY=abc=def\nnot a pair\n");
        assert_eq!(parsed.get("TRELLO_API_KEY").unwrap(), "abc=def");
        assert_eq!(parsed.len(), 1);
    }
}
