//! Pipeline driver: client list in, three export sinks out.

use crate::clients;
use crate::config::Config;
use crate::export::Exporter;
use crate::extract;
use crate::history::HistoryTable;
use crate::renderer::Renderer;
use crate::store;
use anyhow::Result;
use chrono::Local;
use std::sync::Arc;
use tracing::info;

/// Printed once on a fully successful run.
pub const COMPLETION_MESSAGE: &str =
    "Coleta concluída. Dados salvos em CSV, Excel e Google Sheets.";

/// Sequential driver over the configured client list.
pub struct Pipeline {
    config: Config,
    renderer: Arc<dyn Renderer>,
}

impl Pipeline {
    pub fn new(config: Config, renderer: Arc<dyn Renderer>) -> Self {
        Self { config, renderer }
    }

    /// Load the client list and history, then fold one observation per
    /// client into the table, in list order.
    ///
    /// Extraction failures degrade to "no version"; anything else is fatal.
    pub async fn collect(&self) -> Result<HistoryTable> {
        let entries = clients::load_clients(&self.config.clients_csv)?;
        let mut table = store::load_history(&self.config.history_csv)?;
        info!(clients = entries.len(), known = table.len(), "starting collection");

        for entry in &entries {
            let observed = extract::extract_version(
                self.renderer.as_ref(),
                &entry.url,
                self.config.navigation_timeout_ms,
            )
            .await;
            table.upsert(
                &entry.client_name,
                &entry.url,
                observed.as_deref(),
                Local::now().naive_local(),
            );
        }

        Ok(table)
    }

    /// Full run: collect, export once, print the completion line.
    pub async fn run(&self) -> Result<()> {
        let table = self.collect().await?;

        let exporter = Exporter::new(self.config.clone());
        exporter.export(&table).await?;

        println!("{COMPLETION_MESSAGE}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::VERSION_NOT_FOUND;
    use crate::renderer::{NavigationResult, RenderContext};
    use anyhow::bail;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::path::Path;

    /// Renderer that maps each requested URL to a scripted final URL.
    /// URLs with no script entry fail navigation.
    struct ScriptedRenderer {
        final_urls: HashMap<String, String>,
    }

    impl ScriptedRenderer {
        fn new(script: &[(&str, &str)]) -> Self {
            Self {
                final_urls: script
                    .iter()
                    .map(|(from, to)| (from.to_string(), to.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl Renderer for ScriptedRenderer {
        async fn new_context(&self) -> anyhow::Result<Box<dyn RenderContext>> {
            Ok(Box::new(ScriptedContext {
                final_urls: self.final_urls.clone(),
            }))
        }
        async fn shutdown(&self) -> anyhow::Result<()> {
            Ok(())
        }
        fn active_contexts(&self) -> usize {
            0
        }
    }

    struct ScriptedContext {
        final_urls: HashMap<String, String>,
    }

    #[async_trait]
    impl RenderContext for ScriptedContext {
        async fn navigate(
            &mut self,
            url: &str,
            _timeout_ms: u64,
        ) -> anyhow::Result<NavigationResult> {
            match self.final_urls.get(url) {
                Some(final_url) => Ok(NavigationResult {
                    final_url: final_url.clone(),
                    load_time_ms: 1,
                }),
                None => bail!("simulated navigation failure for {url}"),
            }
        }
        async fn close(self: Box<Self>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn write_client_list(dir: &Path, rows: &[(&str, &str)]) {
        let mut contents = String::from("Cliente,URL\n");
        for (client, url) in rows {
            contents.push_str(&format!("{client},{url}\n"));
        }
        std::fs::write(dir.join("clientes.csv"), contents).unwrap();
    }

    fn test_config(dir: &Path) -> Config {
        Config {
            clients_csv: dir.join("clientes.csv"),
            history_csv: dir.join("historico_versoes.csv"),
            history_xlsx: dir.join("historico_versoes.xlsx"),
            sheet_name: "historico_versoes".to_string(),
            credentials_path: None,
            navigation_timeout_ms: 1000,
            sheets_api_base: "http://127.0.0.1:0".to_string(),
            drive_api_base: "http://127.0.0.1:0".to_string(),
        }
    }

    #[tokio::test]
    async fn test_collect_first_run_records_observations() {
        let dir = tempfile::tempdir().unwrap();
        write_client_list(
            dir.path(),
            &[
                ("Acme", "https://acme.example/entry"),
                ("Beta", "https://beta.example/entry"),
            ],
        );

        let renderer = Arc::new(ScriptedRenderer::new(&[
            ("https://acme.example/entry", "https://acme.example/app?v=3"),
            // Beta's final URL carries no version parameter
            ("https://beta.example/entry", "https://beta.example/portal"),
        ]));
        let pipeline = Pipeline::new(test_config(dir.path()), renderer);

        let table = pipeline.collect().await.unwrap();
        assert_eq!(table.len(), 2);

        let acme = table.get("Acme").unwrap();
        assert_eq!(acme.current_version, "v=3");
        assert_eq!(acme.previous_version, "v=3");

        let beta = table.get("Beta").unwrap();
        assert_eq!(beta.current_version, VERSION_NOT_FOUND);
        assert_eq!(beta.previous_version, VERSION_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_collect_detects_version_change_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        write_client_list(dir.path(), &[("Acme", "https://acme.example/entry")]);
        let config = test_config(dir.path());

        let first = Pipeline::new(
            config.clone(),
            Arc::new(ScriptedRenderer::new(&[(
                "https://acme.example/entry",
                "https://acme.example/app?v=3",
            )])),
        );
        let table = first.collect().await.unwrap();
        store::write_history_csv(&config.history_csv, &table).unwrap();

        let second = Pipeline::new(
            config.clone(),
            Arc::new(ScriptedRenderer::new(&[(
                "https://acme.example/entry",
                "https://acme.example/app?v=4",
            )])),
        );
        let table = second.collect().await.unwrap();

        let acme = table.get("Acme").unwrap();
        assert_eq!(acme.current_version, "v=4");
        assert_eq!(acme.previous_version, "v=3");
    }

    #[tokio::test]
    async fn test_collect_failed_extraction_keeps_stored_versions() {
        let dir = tempfile::tempdir().unwrap();
        write_client_list(dir.path(), &[("Acme", "https://acme.example/entry")]);
        let config = test_config(dir.path());

        let first = Pipeline::new(
            config.clone(),
            Arc::new(ScriptedRenderer::new(&[(
                "https://acme.example/entry",
                "https://acme.example/app?v=3",
            )])),
        );
        store::write_history_csv(&config.history_csv, &first.collect().await.unwrap()).unwrap();

        // Navigation now fails outright
        let second = Pipeline::new(config.clone(), Arc::new(ScriptedRenderer::new(&[])));
        let table = second.collect().await.unwrap();

        let acme = table.get("Acme").unwrap();
        assert_eq!(acme.current_version, "v=3");
        assert_eq!(acme.previous_version, "v=3");
    }

    #[tokio::test]
    async fn test_collect_missing_client_list_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(
            test_config(dir.path()),
            Arc::new(ScriptedRenderer::new(&[])),
        );
        assert!(pipeline.collect().await.is_err());
    }

    #[tokio::test]
    async fn test_collect_preserves_rows_for_dropped_clients() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        write_client_list(
            dir.path(),
            &[
                ("Acme", "https://acme.example/entry"),
                ("Beta", "https://beta.example/entry"),
            ],
        );
        let first = Pipeline::new(
            config.clone(),
            Arc::new(ScriptedRenderer::new(&[
                ("https://acme.example/entry", "https://acme.example/app?v=1"),
                ("https://beta.example/entry", "https://beta.example/app?v=9"),
            ])),
        );
        store::write_history_csv(&config.history_csv, &first.collect().await.unwrap()).unwrap();

        // Beta drops out of the input list; its row must survive untouched.
        write_client_list(dir.path(), &[("Acme", "https://acme.example/entry")]);
        let second = Pipeline::new(
            config.clone(),
            Arc::new(ScriptedRenderer::new(&[(
                "https://acme.example/entry",
                "https://acme.example/app?v=2",
            )])),
        );
        let table = second.collect().await.unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Acme").unwrap().current_version, "v=2");
        assert_eq!(table.get("Beta").unwrap().current_version, "v=9");
    }
}
