use crate::commands::prompts;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::{Confirm, Select};
use movie_log_config::PathManager;
use movie_log_core::{AppSession, DetailState, SearchState, MIN_QUERY_LEN};
use movie_log_models::MovieDetail;
use std::sync::Arc;

const RATING_LABELS: [&str; 10] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"];

pub async fn run_browse(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = super::load_config(&paths)?;
    let client = super::omdb_client(&config)?;
    let store = super::open_store(&paths)?;
    let mut session = AppSession::new(Arc::new(client), store);

    output.info("Search the movie database. An empty query quits, Esc backs out.");

    loop {
        let query = prompts::prompt_string("Search movies", None)?;
        let query = query.trim();
        if query.is_empty() {
            break;
        }

        // A new query always supersedes: closes the detail pane and cancels
        // whatever search was still in flight.
        session.set_query(query);

        if query.chars().count() < MIN_QUERY_LEN {
            output.warn(format!(
                "Type at least {} characters to search",
                MIN_QUERY_LEN
            ));
            continue;
        }

        let spinner = output.spinner("Searching...");
        let mut rx = session.subscribe_search();
        let state = rx.wait_for(|s| !s.loading).await?.clone();
        spinner.finish_and_clear();

        if let Some(message) = &state.error {
            output.error(message);
            continue;
        }

        output.info(format!("Found {} results", state.results.len()));
        if state.results.is_empty() {
            continue;
        }

        browse_results(&mut session, &state, output).await?;
    }

    render_summary(&session, output);

    Ok(())
}

/// Result picker loop. Esc goes back to the query prompt.
async fn browse_results(
    session: &mut AppSession,
    state: &SearchState,
    output: &Output,
) -> Result<()> {
    let labels: Vec<String> = state
        .results
        .iter()
        .map(|movie| format!("{} ({})", movie.title, movie.year))
        .collect();

    loop {
        let Some(index) = Select::new()
            .with_prompt("Pick a movie")
            .items(&labels)
            .default(0)
            .interact_opt()?
        else {
            return Ok(());
        };

        let imdb_id = state.results[index].imdb_id.clone();

        let spinner = output.spinner("Fetching movie details...");
        session.select(&imdb_id).await;
        spinner.finish_and_clear();

        let detail = match session.detail().state().clone() {
            DetailState::Loaded { detail } => detail,
            DetailState::Failed { message, .. } => {
                output.error(message);
                session.close_detail();
                continue;
            }
            _ => continue,
        };

        output.terminal_title(&format!("popcorn | {}", detail.title));
        render_detail(&detail, output);

        if let Some(rating) = session.detail().watched_rating() {
            output.info(format!("You rated this movie {}/10 🌟", rating));
            session.close_detail();
        } else {
            rate_and_add(session, output)?;
        }

        output.reset_terminal_title();
    }
}

/// Rating loop: the user can adjust the rating until confirming; every
/// adjustment is counted into the entry. Esc backs out without adding.
fn rate_and_add(session: &mut AppSession, output: &Output) -> Result<()> {
    loop {
        let Some(choice) = Select::new()
            .with_prompt("Your rating")
            .items(&RATING_LABELS)
            .interact_opt()?
        else {
            session.close_detail();
            return Ok(());
        };

        let rating = (choice + 1) as u8;
        session
            .detail_mut()
            .set_rating(rating)
            .map_err(|e| eyre!("{}", e))?;

        let confirmed = Confirm::new()
            .with_prompt(format!("Add to the watched list with rating {}/10?", rating))
            .default(true)
            .interact()?;

        if confirmed {
            let entry = session.add_to_watched().map_err(|e| eyre!("{}", e))?;
            output.success(format!("Added {} to your watched list", entry.title));
            return Ok(());
        }
    }
}

fn render_detail(detail: &MovieDetail, output: &Output) {
    output.info(format!("\n{} ({})", detail.title, detail.year));
    output.info(format!("{} • {}", detail.released, detail.runtime));
    output.info(detail.genre.clone());
    match detail.imdb_rating {
        Some(rating) => output.info(format!("⭐ {} IMDb rating", rating)),
        None => output.info("⭐ not rated yet"),
    }
    output.info(format!("\n{}\n", detail.plot));
    output.info(format!("Starring {}", detail.actors));
    output.info(format!("Directed by {}\n", detail.director));
}

fn render_summary(session: &AppSession, output: &Output) {
    let summary = session.watched().summary();
    if summary.count == 0 {
        return;
    }

    let mean = |value: Option<f64>| -> String {
        value
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "-".to_string())
    };

    output.info(format!(
        "Movies you watched: {} • ⭐ {} • 🌟 {} • ⏳ {} min",
        summary.count,
        mean(summary.avg_imdb_rating),
        mean(summary.avg_user_rating),
        mean(summary.avg_runtime_min),
    ));
}
