use crate::commands::prompts;
use crate::output::{Output, OutputFormat};
use crate::WatchedCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Table;
use movie_log_config::PathManager;
use movie_log_core::WatchedStore;

pub async fn run_watched(cmd: WatchedCommands, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let mut store = super::open_store(&paths)?;

    match cmd {
        WatchedCommands::List => list(&store, output),
        WatchedCommands::Summary => summary(&store, output),
        WatchedCommands::Remove { imdb_id } => remove(&mut store, &imdb_id, output),
        WatchedCommands::Clear { yes } => clear(&mut store, yes, output),
    }
}

fn list(store: &WatchedStore, output: &Output) -> Result<()> {
    if output.format() != OutputFormat::Human {
        output.json(&serde_json::to_value(store.entries())?);
        return Ok(());
    }

    if store.is_empty() {
        output.info("The watched list is empty.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Title", "Year", "IMDb", "Yours", "Runtime", "IMDb ID"]);
    for entry in store.entries() {
        table.add_row(vec![
            entry.title.clone(),
            entry.year.clone(),
            entry
                .imdb_rating
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "-".to_string()),
            format!("{}/10", entry.user_rating),
            entry
                .runtime_min
                .map(|m| format!("{} min", m))
                .unwrap_or_else(|| "-".to_string()),
            entry.imdb_id.clone(),
        ]);
    }
    output.info(table.to_string());

    Ok(())
}

fn summary(store: &WatchedStore, output: &Output) -> Result<()> {
    let summary = store.summary();

    if output.format() != OutputFormat::Human {
        output.json(&serde_json::json!({
            "count": summary.count,
            "avg_imdb_rating": summary.avg_imdb_rating,
            "avg_user_rating": summary.avg_user_rating,
            "avg_runtime_min": summary.avg_runtime_min,
        }));
        return Ok(());
    }

    output.info("Movies you watched");
    output.info(format!("  #  {} movies", summary.count));
    output.info(format!("  ⭐ {}", mean_text(summary.avg_imdb_rating, "")));
    output.info(format!("  🌟 {}", mean_text(summary.avg_user_rating, "")));
    output.info(format!(
        "  ⏳ {}",
        mean_text(summary.avg_runtime_min, " min")
    ));

    Ok(())
}

// An empty list has no means; show a placeholder instead of a number.
fn mean_text(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{:.2}{}", v, suffix),
        None => "-".to_string(),
    }
}

fn remove(store: &mut WatchedStore, imdb_id: &str, output: &Output) -> Result<()> {
    if store.remove(imdb_id).map_err(|e| eyre!("{}", e))? {
        output.success(format!("Removed {} from the watched list", imdb_id));
    } else {
        output.warn(format!("{} is not on the watched list", imdb_id));
    }

    Ok(())
}

fn clear(store: &mut WatchedStore, yes: bool, output: &Output) -> Result<()> {
    if store.is_empty() {
        output.info("The watched list is already empty.");
        return Ok(());
    }

    if !yes {
        let confirmed = prompts::prompt_yes_no(
            &format!("Remove all {} entries from the watched list?", store.len()),
            Some(false),
        )?;
        if !confirmed {
            output.info("Nothing removed.");
            return Ok(());
        }
    }

    let removed = store.clear().map_err(|e| eyre!("{}", e))?;
    output.success(format!("Removed {} entries", removed));

    Ok(())
}
