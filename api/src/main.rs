//! LINEBUZZ API server entry point.
//!
//! Owns the lifecycle of every shared handle: configuration is read once,
//! the pool, repositories and services are constructed here and injected
//! down; nothing below this file touches process-global state.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Context;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use lb_core::services::auth::AuthService;
use lb_core::services::verification::{
    CleanupConfig, VerificationCleanupService, VerificationService, VerificationServiceConfig,
};
use lb_infra::database::{DatabasePool, MySqlUserRepository, MySqlVerificationRepository};
use lb_infra::sms::{create_sms_gateway, SmsGateway};
use lb_shared::config::AppConfig;
use lb_shared::types::response::ErrorResponse;

use lb_api::middleware::cors::create_cors;
use lb_api::routes::auth::{register, reset_password, send_code};
use lb_api::state::AppState;

// Concrete types behind the handler generics
type Users = MySqlUserRepository;
type Codes = MySqlVerificationRepository;
type Sms = SmsGateway;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    info!("Starting LINEBUZZ API server");

    let pool = DatabasePool::new(&config.database)
        .await
        .context("connecting to MySQL")?;

    let user_repo = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let verification_repo = Arc::new(MySqlVerificationRepository::new(pool.get_pool().clone()));
    let sms = Arc::new(create_sms_gateway(&config.sms).context("initializing SMS delivery")?);

    let verification_service = Arc::new(VerificationService::new(
        user_repo.clone(),
        verification_repo.clone(),
        sms,
        VerificationServiceConfig::default(),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        verification_service.clone(),
    ));

    // Periodic sweep of expired verification rows
    let cleanup = VerificationCleanupService::new(verification_repo.clone(), CleanupConfig::default());
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(cleanup.interval());
        loop {
            ticker.tick().await;
            if let Err(e) = cleanup.run_cleanup().await {
                error!(error = %e, "Verification cleanup cycle failed");
            }
        }
    });

    let state = web::Data::new(AppState {
        verification_service,
        auth_service,
    });

    let allowed_origin = std::env::var("CORS_ALLOWED_ORIGIN").ok();
    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Binding HTTP server");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(create_cors(allowed_origin.as_deref()))
            .app_data(state.clone())
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api/v1/auth")
                    .route("/send-code", web::post().to(send_code::<Users, Codes, Sms>))
                    .route("/register", web::post().to(register::<Users, Codes, Sms>))
                    .route(
                        "/reset-password",
                        web::post().to(reset_password::<Users, Codes, Sms>),
                    ),
            )
            .default_service(web::route().to(not_found))
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "linebuzz-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
