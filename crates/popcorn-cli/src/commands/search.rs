use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::Table;
use movie_log_config::PathManager;
use movie_log_core::{SearchController, MIN_QUERY_LEN};
use std::sync::Arc;

pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = super::load_config(&paths)?;
    let client = super::omdb_client(&config)?;

    let mut controller = SearchController::new(Arc::new(client));
    let mut rx = controller.subscribe();

    controller.set_query(query);
    if query.chars().count() < MIN_QUERY_LEN {
        output.warn(format!(
            "Type at least {} characters to search",
            MIN_QUERY_LEN
        ));
        return Ok(());
    }

    let spinner = output.spinner("Searching...");
    let state = rx.wait_for(|s| !s.loading).await?.clone();
    spinner.finish_and_clear();

    if let Some(message) = &state.error {
        output.error(message);
        return Ok(());
    }

    if output.format() != OutputFormat::Human {
        output.json(&serde_json::to_value(&state.results)?);
        return Ok(());
    }

    output.info(format!("Found {} results", state.results.len()));

    let mut table = Table::new();
    table.set_header(vec!["#", "Title", "Year", "IMDb ID"]);
    for (index, movie) in state.results.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            movie.title.clone(),
            movie.year.clone(),
            movie.imdb_id.clone(),
        ]);
    }
    output.info(table.to_string());

    Ok(())
}
