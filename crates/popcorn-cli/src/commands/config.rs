use crate::commands::prompts;
use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_log_config::PathManager;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_path = paths.config_file();
    let mut config = super::load_config(&paths)?;

    match cmd {
        ConfigCommands::Show { full } => {
            let key_text = if config.omdb.api_key.is_empty() {
                "(not set)".to_string()
            } else if full {
                config.omdb.api_key.clone()
            } else {
                mask(&config.omdb.api_key)
            };

            if output.format() != OutputFormat::Human {
                output.json(&serde_json::json!({
                    "config_file": config_path,
                    "omdb": {
                        "api_key": key_text,
                        "base_url": config.omdb.base_url,
                    },
                }));
                return Ok(());
            }

            output.info(format!("Config file: {}", config_path.display()));
            output.info(format!("OMDb api key: {}", key_text));
            if let Some(base_url) = &config.omdb.base_url {
                output.info(format!("OMDb base url: {}", base_url));
            }

            Ok(())
        }
        ConfigCommands::Omdb { api_key } => {
            let key = match api_key {
                Some(key) => key,
                None => prompts::prompt_string("OMDb api key", None)?,
            };
            if key.trim().is_empty() {
                return Err(eyre!("The api key cannot be empty"));
            }

            config.omdb.api_key = key.trim().to_string();
            paths.ensure_directories().map_err(|e| eyre!("{}", e))?;
            config.save(&config_path).map_err(|e| eyre!("{}", e))?;

            output.success("Saved OMDb api key");
            Ok(())
        }
    }
}

fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}
