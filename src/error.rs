use thiserror::Error;

/// Failure taxonomy for the tool. Every variant is terminal: there are no
/// retries and no re-prompts, the operator reruns the command instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} not found in .env file or environment variables")]
    MissingCredential(&'static str),

    #[error("invalid selection {input:?}: expected a number between 1 and {max}")]
    UserInput { input: String, max: usize },

    #[error("no matches found for '{needle}'")]
    NoMatch {
        needle: String,
        available: Vec<String>,
    },

    #[error("Trello request failed with status {status}: {body}")]
    Remote { status: u16, body: String },
}
