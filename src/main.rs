use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use radarcli::{
    cli,
    config::{self, SyncConfig},
    error,
    types::PkceToken,
};
use tokio::sync::Mutex;

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
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show recent releases from followed artists
    Releases(ReleasesOptions),

    /// List followed artists
    Artists(ArtistsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ReleasesOptions {
    /// Maximum age of releases to display in days
    #[clap(long, default_value_t = 60)]
    pub max_age_days: i64,

    /// Only show releases available in this region (ISO 3166-1 alpha-2)
    #[clap(long)]
    pub region: Option<String>,

    /// Hide EPs and singles, only show full-length releases
    #[clap(long)]
    pub hide_eps: bool,

    /// Show full URLs instead of Spotify URIs
    #[clap(long)]
    pub show_urls: bool,

    /// Show live recordings
    #[clap(long)]
    pub show_live_recordings: bool,

    /// Show re-releases
    #[clap(long)]
    pub show_re_releases: bool,

    /// Show soundtracks
    #[clap(long)]
    pub show_soundtracks: bool,

    /// Show remixes
    #[clap(long)]
    pub show_remixes: bool,

    /// Log filtered releases after the table
    #[clap(long)]
    pub log_filtered: bool,

    /// Evict cache files older than this many days
    #[clap(long, default_value_t = 60)]
    pub cache_retention_days: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistsOptions {
    /// Search for artists
    #[clap(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }

        Command::Releases(opt) => {
            let cfg = SyncConfig {
                max_age_days: opt.max_age_days,
                region: opt.region,
                albums_only: opt.hide_eps,
                show_urls: opt.show_urls,
                exclude_live: !opt.show_live_recordings,
                exclude_re_releases: !opt.show_re_releases,
                exclude_soundtracks: !opt.show_soundtracks,
                exclude_remixes: !opt.show_remixes,
                log_filtered: opt.log_filtered,
                cache_retention_days: opt.cache_retention_days,
                ..SyncConfig::default()
            };
            cli::releases(cfg).await;
        }

        Command::Artists(opt) => cli::artists(opt.search).await,

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
