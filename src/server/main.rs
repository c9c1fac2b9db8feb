use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware;
use tower::ServiceBuilder;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sexton::config::init_config;
use sexton::server::handlers::AppState;
use sexton::server::logging::request_logging_middleware;
use sexton::server::repository::CompanyRepository;
use sexton::server::routes::build_router;
use sexton::server::Database;

#[cfg(feature = "background-jobs")]
use sexton::jobs::{JobConfig, JobScheduler};

#[tokio::main]
async fn main() {
    let config = match init_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    if config.logging.enabled {
        let filter = EnvFilter::try_new(&config.logging.level)
            .unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let db = match Database::new().await {
        Ok(db) => db,
        Err(e) => {
            error!("failed to open database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = db.migrate().await {
        error!("failed to run migrations: {e}");
        std::process::exit(1);
    }

    let repo = Arc::new(CompanyRepository::new(db));

    // Keep the scheduler alive for the lifetime of the server.
    #[cfg(feature = "background-jobs")]
    let _scheduler = if config.decay.enabled {
        let job_config = JobConfig {
            decay_cron: config.decay.cron.clone(),
            prevent_overlap: config.decay.prevent_overlap,
        };

        match JobScheduler::new(Arc::clone(&repo), job_config).await {
            Ok(scheduler) => match scheduler.start().await {
                Ok(()) => Some(scheduler),
                Err(e) => {
                    error!("failed to start job scheduler: {e}");
                    None
                }
            },
            Err(e) => {
                error!("failed to create job scheduler: {e}");
                None
            }
        }
    } else {
        info!("Decay sweep disabled by configuration");
        None
    };

    let state = AppState { repo };
    let app = build_router(state)
        .layer(ServiceBuilder::new().layer(middleware::from_fn(request_logging_middleware)));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .expect("invalid server.host/server.port");

    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind server address");

    axum::serve(listener, app)
        .await
        .expect("server exited with an error");
}
