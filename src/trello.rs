use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::Error;
use crate::matcher::Named;

pub const BASE_URL: &str = "https://api.trello.com/1";

/// Thin client for the four Trello calls this tool makes. Authentication is
/// the key+token query-parameter scheme; no retries, default timeouts.
pub struct TrelloClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrelloList {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    pub id_list: String,
}

impl Named for TrelloList {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Card {
    fn name(&self) -> &str {
        &self.name
    }
}

impl TrelloClient {
    pub fn new(api_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_base_url(api_key, token, BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        token: impl Into<String>,
        base_url: &str,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            token: token.into(),
        }
    }

    fn auth_params(&self) -> [(&str, &str); 2] {
        [("key", &self.api_key), ("token", &self.token)]
    }

    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        let response = self
            .client
            .get(format!("{}/members/me/boards", self.base_url))
            .query(&self.auth_params())
            .query(&[("fields", "name,id")])
            .send()
            .await
            .context("Trello members/me/boards failed")?;
        decode(response).await
    }

    pub async fn list_lists(&self, board_id: &str) -> Result<Vec<TrelloList>> {
        let response = self
            .client
            .get(format!("{}/boards/{board_id}/lists", self.base_url))
            .query(&self.auth_params())
            .query(&[("fields", "name,id")])
            .send()
            .await
            .context("Trello boards/lists failed")?;
        decode(response).await
    }

    pub async fn list_cards(&self, board_id: &str) -> Result<Vec<Card>> {
        let response = self
            .client
            .get(format!("{}/boards/{board_id}/cards", self.base_url))
            .query(&self.auth_params())
            .query(&[("fields", "name,id,idList")])
            .send()
            .await
            .context("Trello boards/cards failed")?;
        decode(response).await
    }

    /// Move a card into another list. Returns the updated card.
    pub async fn move_card(&self, card_id: &str, list_id: &str) -> Result<Card> {
        let response = self
            .client
            .put(format!("{}/cards/{card_id}", self.base_url))
            .query(&self.auth_params())
            .query(&[("idList", list_id)])
            .send()
            .await
            .context("Trello move card failed")?;
        decode(response).await
    }
}

/// Classify non-2xx responses before touching the body; success bodies are
/// decoded as JSON.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Remote {
            status: status.as_u16(),
            body,
        }
        .into());
    }
    response
        .json()
        .await
        .context("Failed to decode Trello response")
}
