use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_log_config::{Config, PathManager};
use movie_log_core::{WatchedStorage, WatchedStore};
use movie_log_omdb::{OmdbClient, OMDB_BASE_URL};

pub mod add;
pub mod browse;
pub mod config;
pub mod prompts;
pub mod search;
pub mod watched;

pub(crate) fn load_config(paths: &PathManager) -> Result<Config> {
    let config_file = paths.config_file();
    tracing::debug!("Loading config from {}", config_file.display());
    Config::load(&config_file).map_err(|e| eyre!("{}", e))
}

pub(crate) fn open_store(paths: &PathManager) -> Result<WatchedStore> {
    paths.ensure_directories().map_err(|e| eyre!("{}", e))?;
    WatchedStore::open(WatchedStorage::new(paths.watched_file())).map_err(|e| eyre!("{}", e))
}

pub(crate) fn omdb_client(config: &Config) -> Result<OmdbClient> {
    let api_key = config.require_api_key().map_err(|e| eyre!("{}", e))?;
    let base_url = config
        .omdb
        .base_url
        .clone()
        .unwrap_or_else(|| OMDB_BASE_URL.to_string());

    OmdbClient::with_base_url(api_key, base_url).map_err(|e| eyre!("{}", e))
}
