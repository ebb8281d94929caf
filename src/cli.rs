use anyhow::{bail, Context, Result};

use crate::config::{self, Credentials};
use crate::matcher::fuzzy_match;
use crate::prompt::Prompter;
use crate::session::Session;
use crate::trello::TrelloClient;

/// The two positional arguments: a card-name fragment and a list-name
/// fragment.
#[derive(Debug)]
pub struct Args {
    pub card_name: String,
    pub column: String,
}

/// Parse the argument list (program name excluded). Anything other than
/// exactly two arguments is a usage error.
pub fn parse_args(args: &[String]) -> Result<Args> {
    if args.len() != 2 {
        bail!("Usage: trello-move <card_name> <column>\ne.g. trello-move fcas testing");
    }
    Ok(Args {
        card_name: args[0].clone(),
        column: args[1].clone(),
    })
}

/// Resolve credentials and session, then perform the move against the real
/// Trello endpoint.
pub async fn run(args: &Args, prompter: &mut dyn Prompter) -> Result<()> {
    let credentials = Credentials::resolve()?;
    let session =
        Session::load_or_bootstrap(&credentials, &config::session_path(), prompter).await?;
    let client = TrelloClient::new(&credentials.api_key, &session.token);
    run_move(args, &client, &session, prompter).await
}

/// Fetch the board snapshot, resolve both fragments and move the card. A
/// card already sitting in the target list is reported as a no-op without
/// any remote write.
pub async fn run_move(
    args: &Args,
    client: &TrelloClient,
    session: &Session,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let lists = client.list_lists(&session.board_id).await?;
    let cards = client.list_cards(&session.board_id).await?;

    let card = fuzzy_match(&args.card_name, &cards, prompter)?;
    let target = fuzzy_match(&args.column, &lists, prompter)?;

    if card.id_list == target.id {
        println!(
            "\nCard '{}' is already in list '{}'",
            card.name, target.name
        );
        return Ok(());
    }

    let current = lists
        .iter()
        .find(|list| list.id == card.id_list)
        .context("Card's current list was not found on the board")?;

    client.move_card(&card.id, &target.id).await?;
    println!(
        "\nMoved card '{}' from '{}' to '{}'",
        card.name, current.name, target.name
    );
    Ok(())
}
