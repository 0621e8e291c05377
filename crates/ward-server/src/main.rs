//! `ward` binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, and either serves the lookup API or runs a single lookup.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use ward_core::{lookup, subject::SubjectId};
use ward_server::{AppState, ServerConfig, appeal, render::MessageNotifier};
use ward_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Ward blacklist lookup service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, global = true, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the lookup API over HTTP.
  Serve,
  /// Look up one subject and print the rendered message.
  Check {
    /// Subject id to look up.
    id: String,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("store_path", "ward.db")?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(
      config::Environment::with_prefix("WARD")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("severity_order"),
    )
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let ranking = server_cfg
    .ranking()
    .context("invalid severity_order")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let (appeals, worker) = appeal::spawn_worker(store.clone());
  let state = AppState {
    store:   Arc::new(store),
    appeals: Arc::new(appeals),
    ranking: Arc::new(ranking),
  };

  match cli.command {
    Command::Serve => {
      let app = ward_server::router(state);
      let address = format!("{}:{}", server_cfg.host, server_cfg.port);

      tracing::info!("Listening on http://{address}");
      let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

      axum::serve(listener, app).await.context("server error")?;
    }
    Command::Check { id } => {
      let message = lookup::check_and_render(
        state.store.as_ref(),
        state.appeals.as_ref(),
        &state.ranking,
        &MessageNotifier,
        &SubjectId::new(id),
      )
      .await
      .context("lookup failed")?;

      // Let the worker record any appeal this lookup started.
      drop(state);
      worker.await.context("appeal worker panicked")?;

      println!("{}", serde_json::to_string_pretty(&message)?);
    }
  }

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
