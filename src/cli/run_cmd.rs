//! `verwatch run` — the default command: check every client once and export.

use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::renderer::chromium::ChromiumRenderer;
use crate::renderer::Renderer;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Run the pipeline against the configured client list.
pub async fn run() -> Result<()> {
    let config = Config::from_env();

    let renderer: Arc<dyn Renderer> = Arc::new(ChromiumRenderer::new().await?);
    info!("Chromium renderer initialized");

    let pipeline = Pipeline::new(config, Arc::clone(&renderer));
    let result = pipeline.run().await;

    renderer.shutdown().await?;
    result
}
