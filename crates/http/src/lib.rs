//! HTTP server facade for hondana with Axum, error handling, and graceful shutdown.

use anyhow::Context;
use axum::{response::Redirect, routing::get, Router};

use hondana_kernel::{InitCtx, ModuleRegistry};

pub mod error;
pub mod router;

use router::RouterBuilder;

/// Start the HTTP server with the given module registry
pub async fn start_server(registry: &ModuleRegistry, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
    let server = &ctx.settings.server;

    tracing::info!("starting HTTP server on {}:{}", server.host, server.port);

    let app = build_router(registry, ctx);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", server.host, server.port))
        .await
        .context("failed to bind to address")?;

    tracing::info!(
        "HTTP server listening on http://{}:{}",
        server.host,
        server.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the main HTTP router with all module routes mounted
fn build_router(registry: &ModuleRegistry, ctx: &InitCtx<'_>) -> Router {
    let mut router_builder = RouterBuilder::new()
        .with_tracing()
        .with_request_id()
        .with_timeout(ctx.settings.server.request_timeout_ms);

    router_builder = router_builder.route("/healthz", get(health_check));

    // The first registered module is the landing page.
    if let Some(module) = registry.modules().first() {
        let landing = format!("/{}", module.name());
        router_builder = router_builder.route(
            "/",
            get(move || {
                let landing = landing.clone();
                async move { Redirect::to(&landing) }
            }),
        );
    }

    for module in registry.modules() {
        let module_name = module.name();
        let module_router = module.routes(ctx);

        tracing::info!(module = module_name, "mounting module routes under /{}", module_name);
        router_builder = router_builder.mount_module(module_name, module_router);
    }

    router_builder.build()
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
    }
}
