use catalog::cli::{Cli, Command};
use catalog::config::Config;
use catalog::server::{CatalogState, catalog_router};
use catalog::{db, interchange};
use clap::Parser;
use mimalloc::MiMalloc;
use std::net::SocketAddr;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = Config::load(cli.config.as_deref())?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cfg).await?,
        Command::Import { file } => {
            let db = db::spawn(&cfg.basic.database_url).await?;
            let imported = interchange::import_file(&db, &file).await?;
            println!("Imported {imported} records from {}", file.display());
        }
        Command::Export { file } => {
            let path = file.unwrap_or_else(|| cfg.catalog.export_path.clone());
            let db = db::spawn(&cfg.basic.database_url).await?;
            let exported = interchange::export_table(&db, &path).await?;
            println!("Exported {exported} records to {}", path.display());
        }
        Command::Sort { file } => {
            let sorted = interchange::sort_file(&file).await?;
            println!("Sorted {sorted} records in {}", file.display());
        }
    }
    Ok(())
}

async fn serve(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        database_url = %cfg.basic.database_url,
        loglevel = %cfg.basic.loglevel,
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        page_size = cfg.catalog.page_size,
        export_path = %cfg.catalog.export_path.display(),
        cookie_secret = if cfg.basic.cookie_secret.is_some() { "<configured>" } else { "<generated>" },
        insecure_cookie = cfg.basic.insecure_cookie,
    );

    let cookie_key = cfg.basic.cookie_key()?;
    let db = db::spawn(&cfg.basic.database_url).await?;
    let state = CatalogState::new(db, &cfg, cookie_key)?;
    let app = catalog_router(state);

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server has shut down gracefully.");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal as unix_signal};

        match unix_signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    res = signal::ctrl_c() => log_ctrl_c(res),
                    _ = term.recv() => info!("SIGTERM received, shutting down"),
                }
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable, only Ctrl-C stops the server");
                log_ctrl_c(signal::ctrl_c().await);
            }
        }
    }

    #[cfg(not(unix))]
    log_ctrl_c(signal::ctrl_c().await);
}

fn log_ctrl_c(res: std::io::Result<()>) {
    match res {
        Ok(()) => info!("Ctrl-C received, shutting down"),
        Err(e) => warn!(error = %e, "Ctrl-C handler failed, shutting down"),
    }
}
