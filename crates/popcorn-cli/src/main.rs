use clap::{ArgAction, Parser, Subcommand};
use commands::{add, browse, config, search, watched};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "popcorn - Search movies, rate them, remember what you watched")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, view, rate, and add movies interactively
    #[command(long_about = "Interactive session: type a query, pick a movie from the results, read its details, rate it 1-10, and add it to your watched list. An empty query quits; Esc backs out one level.")]
    Browse,

    /// Search the movie database (one-shot)
    Search {
        /// Search terms; at least 3 characters are required to issue a request
        query: String,
    },

    /// Rate a movie by identifier and add it to the watched list
    Add {
        /// IMDb identifier, e.g. tt1375666
        imdb_id: String,

        /// Your rating, 1-10
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: u8,
    },

    /// Inspect and edit the watched list
    Watched {
        #[command(subcommand)]
        cmd: WatchedCommands,
    },

    /// Configure credentials and settings
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum WatchedCommands {
    /// List every watched movie
    List,

    /// Show aggregate stats over the watched list
    Summary,

    /// Remove one movie by identifier
    Remove {
        /// IMDb identifier, e.g. tt1375666
        imdb_id: String,
    },

    /// Remove every entry from the watched list
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the api key)
    Show {
        /// Show the api key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Configure the OMDb api key
    #[command(long_about = "Store the OMDb api key used for search and detail requests. Get a free key at https://www.omdbapi.com/apikey.aspx. The OMDB_API_KEY environment variable overrides the stored value.")]
    Omdb {
        /// Api key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Browse => browse::run_browse(&output).await,
        Commands::Search { query } => search::run_search(&query, &output).await,
        Commands::Add { imdb_id, rating } => add::run_add(&imdb_id, rating, &output).await,
        Commands::Watched { cmd } => watched::run_watched(cmd, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output).await
        }
    }
}
