use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{extract::ws::WebSocketUpgrade, response::Html, routing::get, Router};
use indoc::formatdoc;
use tracing::{info, warn};

use super::app::{app, AppProps};
use crate::assistant_core::{KnowledgeTable, OpenAiGenerator, Resolver};
use crate::config::Config;

/// Loads the knowledge table and model backend named by `config`.
pub fn build_resolver(config: &Config) -> Result<Resolver> {
    let knowledge = match &config.knowledge_path {
        Some(path) => Arc::new(KnowledgeTable::load(path).with_context(|| {
            format!("Failed to load knowledge table from {}", path.display())
        })?),
        None => KnowledgeTable::builtin(),
    };
    info!(entries = knowledge.len(), "knowledge table ready");

    let generator = OpenAiGenerator::new(
        &config.model,
        config.api_base.as_deref(),
        config.max_length,
    );
    info!(model = generator.model(), "model backend configured");

    Ok(Resolver::new(knowledge, Arc::new(generator))
        .with_generation_timeout(config.generation_timeout))
}

fn index_page(glue: &str) -> String {
    formatdoc!(
        r#"
        <!DOCTYPE html>
        <html>
            <head>
                <title>AI Healthcare Assistant</title>
                <meta name="viewport"
                content="width=device-width,
                initial-scale=1,
                minimum-scale=1,
                maximum-scale=1,
                user-scalable=no">
            </head>
            <body> <div id="main"></div> </body>
            {glue}
        </html>
        "#
    )
}

pub async fn start_server(config: Config) -> Result<()> {
    let resolver = Arc::new(build_resolver(&config)?);

    let index = index_page(&dioxus_liveview::interpreter_glue(&format!(
        "ws://{}/ws",
        config.reachable_addr
    )));
    let view = dioxus_liveview::LiveViewPool::new();

    let router = Router::new()
        .route("/", get(move || async move { Html(index) }))
        .route(
            "/ws",
            get(move |ws: WebSocketUpgrade| async move {
                ws.on_upgrade(move |socket| async move {
                    info!("session opened");
                    let props = AppProps { resolver };
                    let session = view
                        .launch_with_props(dioxus_liveview::axum_socket(socket), app, props)
                        .await;
                    match session {
                        Ok(()) => info!("session closed"),
                        Err(_) => warn!("session closed with a socket error"),
                    }
                })
            }),
        );

    info!("Listening on http://{}", config.listen_addr);

    axum::Server::bind(&config.listen_addr)
        .serve(router.into_make_service())
        .await
        .context("Server stopped unexpectedly")
}
