use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dashboard_core::{features::dashboard_registry, DashboardStore, RootReducer};
use shared::protocol::Action;
use storage::Storage;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod navigation;

use navigation::RebootNavigator;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long)]
    database_url: Option<String>,
    /// Do not read or write the persisted state snapshot.
    #[arg(long)]
    no_persist: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dispatch actions from a file (JSON array or one action per line) and print the final state.
    Replay { file: PathBuf },
    /// Print the state a fresh boot restores.
    State,
    /// Clear persisted storage and reboot.
    Logout,
}

fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// One dashboard run. A hard redirect ends the current store and boots a new
/// one from whatever storage holds at that point.
struct Session {
    reducer: RootReducer,
    storage: Arc<Storage>,
    navigator: Arc<RebootNavigator>,
    redirects: UnboundedReceiver<String>,
    persist_state: bool,
    store: DashboardStore,
    boots: usize,
}

impl Session {
    async fn start(reducer: RootReducer, storage: Storage, persist_state: bool) -> Result<Self> {
        let (navigator, redirects) = RebootNavigator::channel();
        let storage = Arc::new(storage);
        let navigator = Arc::new(navigator);
        let store = DashboardStore::boot(
            reducer.clone(),
            storage.clone(),
            navigator.clone(),
            persist_state,
        )
        .await?;
        Ok(Self {
            reducer,
            storage,
            navigator,
            redirects,
            persist_state,
            store,
            boots: 1,
        })
    }

    async fn dispatch(&mut self, action: Action) -> Result<()> {
        let kind = action.kind.clone();
        self.store
            .dispatch(action)
            .await
            .with_context(|| format!("failed to dispatch {kind}"))?;

        while let Ok(path) = self.redirects.try_recv() {
            info!(%path, boots = self.boots, "hard redirect; rebooting dashboard");
            self.store = DashboardStore::boot(
                self.reducer.clone(),
                self.storage.clone(),
                self.navigator.clone(),
                self.persist_state,
            )
            .await?;
            self.boots += 1;
        }
        Ok(())
    }
}

async fn read_actions(path: &Path) -> Result<Vec<Action>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read action script '{}'", path.display()))?;

    if raw.trim_start().starts_with('[') {
        return serde_json::from_str(&raw).context("action script is not a json array of actions");
    }

    raw.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("line {}: not a valid action", index + 1))
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = config::load_settings(&args.config)?;
    if let Some(database_url) = args.database_url {
        settings.database_url = database_url;
    }
    if args.no_persist {
        settings.persist_state = false;
    }
    init_tracing(settings.log_json);

    let database_url = config::prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url).await?;
    storage.health_check().await?;
    let reducer = RootReducer::new(dashboard_registry()?);

    let actions = match &args.command {
        Command::Replay { file } => read_actions(file).await?,
        Command::State => Vec::new(),
        Command::Logout => vec![Action::log_out()],
    };
    info!(database_url = %database_url, actions = actions.len(), "starting dashboard session");

    let mut session = Session::start(reducer, storage, settings.persist_state).await?;
    for action in actions {
        session.dispatch(action).await?;
    }

    println!("{}", serde_json::to_string_pretty(session.store.state())?);
    Ok(())
}
