use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tally_config::TallyConfig;
use tally_session::SessionStore;
use tally_web::{App, Server};

use crate::cli::ServeArgs;

/// Handle `tally serve`: run the workers until Ctrl-C.
pub async fn handle(args: &ServeArgs, mut config: TallyConfig) -> anyhow::Result<()> {
    args.apply(&mut config.server);
    config.validate()?;

    let app = Arc::new(App::from_config(&config).context("failed to build application")?);
    let server = Arc::new(Server::bind(
        &config.server.bind_addr(),
        Arc::clone(&app),
        config.server.max_body_bytes,
    )?);

    let addr = server
        .local_addr()
        .map_or_else(|| config.server.bind_addr(), |addr| addr.to_string());
    let worker_count = config.server.workers;
    tracing::info!(%addr, workers = worker_count, "listening");
    println!("Serving todo lists on http://{addr}/lists (Ctrl-C to stop)");

    let workers: Vec<_> = (0..worker_count)
        .map(|_| {
            let server = Arc::clone(&server);
            tokio::task::spawn_blocking(move || server.run_worker())
        })
        .collect();

    let sweeper = tokio::spawn(sweep_expired(
        Arc::clone(app.store()),
        config.session.sweep_interval(),
    ));

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    tracing::info!("shutting down");

    sweeper.abort();
    for _ in 0..worker_count {
        server.unblock();
    }
    for worker in workers {
        worker.await.context("worker thread panicked")?;
    }

    Ok(())
}

async fn sweep_expired(store: Arc<dyn SessionStore>, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        let purged = store.purge_expired();
        if purged > 0 {
            tracing::debug!(purged, remaining = store.len(), "expired sessions swept");
        }
    }
}
