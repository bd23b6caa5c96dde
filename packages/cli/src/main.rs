use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use comicdesk_library::blocked_pages::BlockedPagesAction;
use comicdesk_library::comic_book::ComicBookAction;
use comicdesk_library::comic_import::ComicImportAction;
use comicdesk_library::config::{
    DEFAULT_BASE_URL, DEFAULT_IMPORT_MAXIMUM, IMPORT_MAXIMUM_VAR, TIMEOUT_VAR, URL_VAR, WS_URL_VAR,
};
use comicdesk_library::reading_lists::ReadingListsAction;
use comicdesk_library::rest_audit_log::RestAuditLogAction;
use comicdesk_library::scraping::ScrapingAction;
use comicdesk_library::selectors::select_ranked_volumes;
use comicdesk_library::{AppAction, AppState, ClientConfig, Library};
use comicdesk_store::{Action, ActionCategory, TracingNotifier};
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

/// comicdesk - talk to a comic library server
#[derive(Parser, Debug)]
#[command(name = "comicdesk")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the library server
    #[arg(long, env = URL_VAR, default_value = DEFAULT_BASE_URL)]
    url: String,

    /// STOMP WebSocket endpoint, used by `watch`
    #[arg(long, env = WS_URL_VAR)]
    ws_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = TIMEOUT_VAR, default_value_t = 30)]
    timeout: u64,

    /// Most files a single `files` scan may list
    #[arg(long, env = IMPORT_MAXIMUM_VAR, default_value_t = DEFAULT_IMPORT_MAXIMUM)]
    import_maximum: usize,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// List blocked page hashes
    BlockedPages,

    /// Show the server's request log
    AuditLog {
        /// Only entries newer than this timestamp (ms since the epoch)
        #[arg(long, default_value_t = 0)]
        cutoff: u64,
    },

    /// Show one comic
    Comic { id: u64 },

    /// List reading lists
    ReadingLists,

    /// List comic files below a directory on the server
    Files {
        directory: String,

        /// Defaults to the import maximum
        #[arg(long)]
        maximum: Option<usize>,
    },

    /// Search the metadata source for volumes, best match first
    Volumes {
        #[arg(long)]
        api_key: String,

        #[arg(long)]
        series: String,

        #[arg(long, default_value = "")]
        volume: String,

        #[arg(long, default_value_t = 25)]
        max_records: u32,

        #[arg(long)]
        skip_cache: bool,
    },

    /// Print server-pushed events for a while
    Watch {
        #[arg(long, default_value_t = 60)]
        seconds: u64,
    },
}

impl Args {
    fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::default()
            .with_base_url(&self.url)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_import_maximum(self.import_maximum);
        if let Some(url) = &self.ws_url {
            config = config.with_websocket_url(url);
        }
        config
    }
}

impl Command {
    /// The command to dispatch, or `None` for `watch`.
    fn action(&self, config: &ClientConfig) -> Option<AppAction> {
        let action: AppAction = match self {
            Command::BlockedPages => BlockedPagesAction::LoadList.into(),
            Command::AuditLog { cutoff } => {
                RestAuditLogAction::GetEntries { cutoff: *cutoff }.into()
            }
            Command::Comic { id } => ComicBookAction::LoadComic { id: *id }.into(),
            Command::ReadingLists => ReadingListsAction::LoadLists.into(),
            Command::Files { directory, maximum } => ComicImportAction::LoadFiles {
                directory: directory.clone(),
                maximum: maximum.unwrap_or(config.import_maximum),
            }
            .into(),
            Command::Volumes {
                api_key,
                series,
                volume,
                max_records,
                skip_cache,
            } => ScrapingAction::LoadVolumes {
                api_key: api_key.clone(),
                series: series.clone(),
                volume: volume.clone(),
                max_records: *max_records,
                skip_cache: *skip_cache,
            }
            .into(),
            Command::Watch { .. } => return None,
        };
        Some(action)
    }

    /// Render the slice this command loaded.
    fn render(&self, state: &AppState) -> serde_json::Result<String> {
        match self {
            Command::BlockedPages => pretty(&state.blocked_pages.entries),
            Command::AuditLog { .. } => pretty(&state.rest_audit_log.entries),
            Command::Comic { .. } => pretty(&state.comic_book.current),
            Command::ReadingLists => pretty(&state.reading_lists.lists),
            Command::Files { .. } => pretty(&state.comic_import.files),
            Command::Volumes { .. } => pretty(&select_ranked_volumes(state)),
            Command::Watch { .. } => pretty(&*state.messaging),
        }
    }
}

fn pretty(value: &impl Serialize) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn watch(library: &mut Library, seconds: u64) -> Result<(), comicdesk_library::Error> {
    if !library.connect_push().await? {
        return Err(comicdesk_library::Error::Config {
            message: format!("`watch` needs --ws-url or {}", WS_URL_VAR),
        });
    }

    let mut actions = library.store().actions();
    let deadline = tokio::time::sleep(Duration::from_secs(seconds));
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            received = actions.recv() => match received {
                Ok(action) if action.category() == ActionCategory::Event => {
                    println!("{} {:?}", action.action_type(), action);
                }
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
        }
    }
    library.detach_broker();
    Ok(())
}

async fn run(args: Args) -> Result<bool, comicdesk_library::Error> {
    let mut library = Library::connect(args.config(), Arc::new(TracingNotifier))?;

    let Some(action) = args.command.action(library.config()) else {
        if let Command::Watch { seconds } = args.command {
            watch(&mut library, seconds).await?;
        }
        return Ok(true);
    };

    let result = library.run(action).await?;
    tracing::debug!(result = result.action_type(), "command finished");
    if result.is_failure() {
        return Ok(false);
    }

    match args.command.render(&library.state()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(false);
        }
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
