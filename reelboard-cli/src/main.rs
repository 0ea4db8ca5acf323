//! `reelboard`, the streaming platform admin console.
//!
//! ```bash
//! reelboard login admin --email root@example.com --password secret
//! reelboard list films --search noir --sort views --sort views
//! reelboard create films --data @film.json
//! reelboard metrics --watch --interval 30
//! ```

mod columns;
mod commands;
mod error;
mod logging;
mod paths;

use std::fs;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use clap::Subcommand;
use log::debug;
use log::warn;
use reelboard_lib::DashboardClient;
use reelboard_lib::api::DEFAULT_API_PREFIX;
use reelboard_lib::api::api_root;
use reelboard_lib::error::ApiError;
use reelboard_lib::auth::Actor;
use reelboard_lib::auth::AuthContext;
use reelboard_lib::auth::CookieStore;
use reelboard_lib::auth::DEFAULT_REFRESH_BUFFER;
use reelboard_lib::auth::MemoryCookieStore;
use reelboard_lib::auth::SqliteCookieStore;
use reelboard_lib::model::Resource;
use reelboard_lib::table::DEFAULT_PAGE_SIZE;

use crate::commands::App;
use crate::commands::records::ListOptions;
use crate::commands::session::LogoutTarget;
use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "reelboard", version, about = "Admin console for the streaming platform")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Server URL
    #[arg(long, global = true, env = "REELBOARD_API_URL", default_value = "http://localhost:5000")]
    api_url: String,

    /// API path prefix
    #[arg(long, global = true, env = "REELBOARD_API_PREFIX", default_value = DEFAULT_API_PREFIX)]
    api_prefix: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Keep the session in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in as admin or creator
    Login {
        actor: Actor,
        #[arg(long, env = "REELBOARD_EMAIL")]
        email: String,
        #[arg(long, env = "REELBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out
    Logout {
        #[arg(value_enum, default_value = "all")]
        target: LogoutTarget,
    },

    /// Show the signed-in account
    Whoami { actor: Actor },

    /// List a resource as a table
    List {
        resource: Resource,
        /// Case-insensitive substring matched against every column
        #[arg(long, short = 's')]
        search: Option<String>,
        /// Column to sort by; repeat to flip the direction
        #[arg(long = "sort", value_name = "KEY")]
        sort: Vec<String>,
        #[arg(long, short = 'p', default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },

    /// Show one record as JSON
    Get { resource: Resource, id: String },

    /// Create a record from JSON (inline or @file)
    Create {
        resource: Resource,
        #[arg(long)]
        data: String,
    },

    /// Delete a record
    Delete { resource: Resource, id: String },

    /// Show dashboard metrics
    Metrics {
        /// Keep refreshing until Ctrl-C
        #[arg(long, short = 'w')]
        watch: bool,
        /// Refresh interval in seconds
        #[arg(long, default_value_t = 60)]
        interval: u64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(hint) = e.hint() {
                eprintln!("hint: {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let app = connect(&cli).await?;

    match cli.command {
        Command::Login { actor, email, password } => commands::session::login(&app, actor, &email, &password).await,
        Command::Logout { target } => commands::session::logout(&app, target).await,
        Command::Whoami { actor } => commands::session::whoami(&app, actor).await,
        Command::List {
            resource,
            search,
            sort,
            page,
            page_size,
        } => {
            let options = ListOptions {
                search,
                sort,
                page,
                page_size,
            };
            commands::records::list(&app, resource, options).await
        }
        Command::Get { resource, id } => commands::records::get(&app, resource, &id).await,
        Command::Create { resource, data } => commands::records::create(&app, resource, &data).await,
        Command::Delete { resource, id } => commands::records::delete(&app, resource, &id).await,
        Command::Metrics { watch: false, .. } => commands::metrics::show(&app).await,
        Command::Metrics { watch: true, interval } => {
            commands::metrics::watch(&app, Duration::from_secs(interval.max(1))).await
        }
    }
}

/// Opens the session store and builds the client.
///
/// Sessions and API calls share one HTTP client, so `--timeout` covers
/// login, refresh and logout as well.
async fn connect(cli: &Cli) -> Result<App, CliError> {
    let timeout = Duration::from_secs(cli.timeout.max(1));
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
        .map_err(ApiError::from)
        .map_err(reelboard_lib::Error::from)?;

    let store = open_store(cli.ephemeral).await?;
    let auth = AuthContext::with_options(
        api_root(&cli.api_url, &cli.api_prefix),
        store,
        http_client.clone(),
        DEFAULT_REFRESH_BUFFER,
    );
    auth.restore().await?;

    let client = DashboardClient::builder()
        .url(cli.api_url.as_str())
        .api_prefix(cli.api_prefix.as_str())
        .auth(auth.clone())
        .http_client(http_client)
        .timeout(timeout)
        .build()
        .map_err(reelboard_lib::Error::from)?;

    Ok(App { auth, client })
}

async fn open_store(ephemeral: bool) -> Result<Arc<dyn CookieStore>, CliError> {
    if ephemeral {
        return Ok(Arc::new(MemoryCookieStore::new()));
    }
    let Some(path) = paths::session_db() else {
        warn!("No home directory, sessions will not be saved");
        return Ok(Arc::new(MemoryCookieStore::new()));
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    debug!("Session store at {}", path.display());
    Ok(Arc::new(SqliteCookieStore::open(&path).await?))
}
