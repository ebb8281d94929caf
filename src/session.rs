use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::Credentials;
use crate::prompt::Prompter;
use crate::trello::{self, TrelloClient};

const AUTHORIZE_URL: &str = "https://trello.com/1/authorize";
const APP_NAME: &str = "Server Token";

/// Persisted authorization token plus the operator's chosen board. Written
/// once by the bootstrap flow and read back on every later run; a stale
/// token is fixed by deleting the file and re-running, never automatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub board_id: String,
    pub board_name: String,
}

impl Session {
    /// Load the persisted session, or walk the one-time authorization flow
    /// (authorize URL, token entry, board selection) and persist the result.
    pub async fn load_or_bootstrap(
        credentials: &Credentials,
        path: &Path,
        prompter: &mut dyn Prompter,
    ) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }
        Self::bootstrap(credentials, path, prompter, trello::BASE_URL).await
    }

    fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session from {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse session file {}", path.display()))
    }

    async fn bootstrap(
        credentials: &Credentials,
        path: &Path,
        prompter: &mut dyn Prompter,
        base_url: &str,
    ) -> Result<Self> {
        println!("\nPlease visit this URL to authorize the application:");
        println!("{}", authorize_url(&credentials.api_key));

        let token = prompter.read_line("Enter the token you received")?;

        let client = TrelloClient::with_base_url(&credentials.api_key, &token, base_url);
        let boards = client.list_boards().await?;

        println!("\nAvailable boards:");
        for (i, board) in boards.iter().enumerate() {
            println!("{}. {}", i + 1, board.name);
        }
        let index = prompter.select("Select board number", boards.len())?;
        let board = &boards[index];

        let session = Session {
            token,
            board_id: board.id.clone(),
            board_name: board.name.clone(),
        };
        session.save(path)?;
        Ok(session)
    }

    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write session to {}", path.display()))
    }
}

/// Authorization URL granting a never-expiring read/write token for the key.
fn authorize_url(api_key: &str) -> String {
    format!(
        "{AUTHORIZE_URL}?expiration=never&scope=read,write&response_type=token&name={}&key={api_key}",
        urlencoding::encode(APP_NAME)
    )
}
