use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_log_config::PathManager;
use movie_log_core::entry_from_detail;
use movie_log_models::MovieDetail;
use movie_log_omdb::OmdbClient;

pub async fn run_add(imdb_id: &str, rating: u8, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = super::load_config(&paths)?;
    let client = super::omdb_client(&config)?;
    let mut store = super::open_store(&paths)?;

    if let Some(existing) = store.user_rating(imdb_id) {
        output.warn(format!(
            "{} is already on the watched list (your rating: {}/10)",
            imdb_id, existing
        ));
        return Ok(());
    }

    let detail = fetch_detail(&client, imdb_id, output).await?;

    let entry = entry_from_detail(&detail, rating, 1);
    store.add(entry).map_err(|e| eyre!("{}", e))?;

    output.success(format!(
        "Added {} ({}) with your rating {}/10",
        detail.title, detail.year, rating
    ));

    Ok(())
}

async fn fetch_detail(
    client: &OmdbClient,
    imdb_id: &str,
    output: &Output,
) -> Result<MovieDetail> {
    let spinner = output.spinner("Fetching movie details...");
    let detail = client.detail(imdb_id).await;
    spinner.finish_and_clear();

    Ok(detail?)
}
