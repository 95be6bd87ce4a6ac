use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use myplycli::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Log matching decisions and HTTP activity to stderr
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Find the Apple Music catalog entry for a song
    Match(SongOptions),

    /// Find the Spotify track URI for a song
    Find(SongOptions),

    /// Show a Spotify playlist with its Apple Music matches
    Translate(TranslateOptions),

    #[clap(about = "Translate a Spotify playlist and publish the result as a new playlist")]
    Generate(GenerateOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SongOptions {
    /// Artist name as shown on the source service
    #[clap(long)]
    pub artist: String,

    /// Track title as shown on the source service
    #[clap(long)]
    pub title: String,
}

#[derive(Args, Debug, Clone)]
pub struct MatchingOptions {
    /// Maximum number of catalog lookups in flight
    #[clap(long)]
    pub concurrency: Option<usize>,

    /// Keep tracks whose lookup failed instead of aborting
    #[clap(long)]
    pub keep_going: bool,
}

impl From<MatchingOptions> for cli::TranslateOptions {
    fn from(opt: MatchingOptions) -> Self {
        cli::TranslateOptions {
            concurrency: opt.concurrency,
            keep_going: opt.keep_going,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct TranslateOptions {
    /// Spotify playlist URL
    pub playlist_url: String,

    #[clap(flatten)]
    pub matching: MatchingOptions,

    /// Print the playlist as JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateOptions {
    /// Spotify playlist URL to translate
    pub playlist_url: String,

    #[clap(flatten)]
    pub matching: MatchingOptions,

    /// Name of the new playlist (defaults to the source playlist's name)
    #[clap(long)]
    pub name: Option<String>,

    /// Description of the new playlist
    #[clap(long)]
    pub description: Option<String>,

    /// Open the new playlist in the browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_new(config::log_filter(verbose))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // MYPLY_LOG may come from a .env file
    let loaded = config::load_env().await;
    init_tracing(cli.verbose);

    if let Err(e) = loaded {
        error!("Cannot load environment. Err: {}", e);
    }

    match cli.command {
        Command::Match(opt) => cli::match_song(opt.artist, opt.title).await,
        Command::Find(opt) => cli::find_song(opt.artist, opt.title).await,
        Command::Translate(opt) => {
            cli::translate(opt.playlist_url, opt.matching.into(), opt.json).await
        }
        Command::Generate(opt) => {
            cli::generate(
                opt.playlist_url,
                opt.matching.into(),
                opt.name,
                opt.description,
                opt.open,
            )
            .await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
