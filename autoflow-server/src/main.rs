//! AutoFlow — sales pipeline tracker HTTP server.
//!
//! # Usage
//!
//! ```text
//! autoflow [--port <port>] [--data-dir <dir>] [--default-config <file>] [--web-dir <dir>]
//! ```
//!
//! State lives in `<data-dir>/db.json` (default `~/.autoflow/`). On first
//! start, the bundled dealership pipeline from `--default-config` seeds the
//! store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;

use autoflow_server::{build_router, paths, AppState};

#[derive(Parser, Debug)]
#[command(
    name = "autoflow",
    version,
    about = "Track sales opportunities through a configurable pipeline",
    long_about = None,
)]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Directory holding db.json. Defaults to ~/.autoflow/.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Pipeline config applied when the store has none yet.
    #[arg(long, default_value = paths::DEFAULT_PIPELINE_FILE)]
    default_config: PathBuf,

    /// Static UI directory; omit to serve the API only.
    #[arg(long)]
    web_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => paths::default_data_dir()
            .context("cannot determine home directory; pass --data-dir")?,
    };
    let db_path = paths::db_path(&data_dir);

    let state = AppState::open(db_path.clone(), &args.default_config)
        .with_context(|| format!("failed to open store at {}", db_path.display()))?;
    let app = build_router(state, args.web_dir);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        addr = %addr,
        db = %db_path.display(),
        "autoflow listening",
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
