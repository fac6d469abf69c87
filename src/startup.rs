use crate::config::LoginConfig;
use crate::error::AppError;
use crate::handlers;
use crate::services::MongoDb;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Router,
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: LoginConfig,
    pub db: MongoDb,
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/getUserInformation", get(handlers::get_user_information))
        .route("/listUsers", get(handlers::list_users))
        .route("/checkUser/:userAlias", get(handlers::check_user))
        .route("/saveUserInformation", post(handlers::save_user_information))
        .route("/updateUserField", patch(handlers::update_user_field))
        .route("/updateUserPin", patch(handlers::update_user_pin))
        .route(
            "/updateUserInformation/:userAlias",
            patch(handlers::update_user_information),
        )
        .route(
            "/saveOrUpdateUserInformation/:userAlias",
            patch(handlers::save_or_update_user_information),
        )
        .route("/clearUsers", delete(handlers::clear_users))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(config: LoginConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;

        // The store must answer before any request is accepted; an
        // unreachable store at startup is fatal, no retry.
        db.health_check().await?;
        db.initialize_indexes().await?;

        let state = AppState {
            config: config.clone(),
            db,
        };

        let app = build_router(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn db(&self) -> &MongoDb {
        &self.state.db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
