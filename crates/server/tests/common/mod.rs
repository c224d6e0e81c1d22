//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port against a database file in
//! a temporary directory. The file is either seeded with the shared fixtures or
//! left missing so the bootstrap flow can be exercised.

// Not every test binary uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use reqwest::Client;
use std::{fs::File, io::Write, net::SocketAddr, path::PathBuf};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};
use toolrec_server::{
    config, router,
    state::{build_app_state, AppState},
};
use toolrec_test_utils::write_fixture_database;

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub db_path: PathBuf,
    pub app_state: AppState,
    _dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

/// What to place at the configured database path before the server starts.
pub enum DatabaseFile {
    /// The shared fixture catalog.
    Fixture,
    /// Nothing; the path does not exist.
    Missing,
    /// These exact bytes.
    Raw(Vec<u8>),
}

impl TestApp {
    /// Spawns the server against a database seeded with the fixture catalog.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(DatabaseFile::Fixture, 1024 * 1024).await
    }

    /// Spawns the server with no database file at the configured path.
    pub async fn spawn_without_database() -> Result<Self> {
        Self::spawn_with(DatabaseFile::Missing, 1024 * 1024).await
    }

    pub async fn spawn_with(database: DatabaseFile, max_upload_bytes: usize) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let dir = tempdir()?;
        let db_path = dir.path().join("recommendation.db");
        match database {
            DatabaseFile::Fixture => write_fixture_database(&db_path).await?,
            DatabaseFile::Missing => {}
            DatabaseFile::Raw(bytes) => std::fs::write(&db_path, bytes)?,
        }

        let config_path = dir.path().join("config.yml");
        let config_content = format!(
            r#"
port: 0
db_url: "{}"
max_upload_bytes: {}
"#,
            db_path.to_str().unwrap(),
            max_upload_bytes
        );
        let mut file = File::create(&config_path)?;
        file.write_all(config_content.as_bytes())?;

        let config = config::get_config(Some(config_path.to_str().unwrap()))?;
        let app_state = build_app_state(config).await?;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            db_path,
            app_state: app_state_for_harness,
            _dir: dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
