//! Test helper for login-service integration tests.
//!
//! Spawns the application on a random port against a uuid-fresh MongoDB
//! database so tests never observe each other's records.

#![allow(dead_code)]

use login_service::config::{LoginConfig, MongoConfig, ServerConfig};
use login_service::startup::Application;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    uri: String,
    db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let uri = std::env::var("TEST_MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db_name = format!("login_test_{}", uuid::Uuid::new_v4());

        let config = LoginConfig {
            server: ServerConfig {
                port: 0,
                body_limit_bytes: 10 * 1024 * 1024,
            },
            mongodb: MongoConfig {
                uri: uri.clone(),
                database: db_name.clone(),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept requests.
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            uri,
            db_name,
        }
    }

    pub async fn cleanup(&self) {
        let client = mongodb::Client::with_uri_str(&self.uri)
            .await
            .expect("Failed to connect for cleanup");
        client
            .database(&self.db_name)
            .drop(None)
            .await
            .expect("Failed to drop test database");
    }
}
