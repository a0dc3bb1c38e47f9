/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (HTTP 共通 layer / 認証ゲートは routes 側)
 * - axum::serve() で起動
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api, config::Config, middleware, services::auth::build_access_verifier, state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,inventory_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing (stderr can be hidden depending on how the process is launched).
        tracing::error!(?info, "panic");

        // Development: crash the whole process so we notice immediately.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn build_state(config: &Config) -> Result<AppState> {
    // Process-level services are built once here and shared read-only through AppState.
    let auth = build_access_verifier(config).context("failed to build access token verifier")?;

    Ok(AppState::new(auth))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    middleware::http::apply(router, config)
}
