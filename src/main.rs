use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod registration;
mod routes;
mod stats;
mod store;
mod utils;

use config::Config;
use db::init_db;
use registration::RegistrationClient;
use store::Repository;

use crate::docs::ApiDoc;
use anyhow::Context;
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Attendance tracker is running"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(addr = %config.server_addr, "Server starting...");

    let repo = match config.database_url.as_deref() {
        Some(url) => Repository::mysql(init_db(url).await?),
        None => {
            warn!("DATABASE_URL not set, running in mock mode with an in-memory store");
            Repository::in_memory()
        }
    };

    let registration = RegistrationClient::new(
        &config.registration_server_url,
        config.api_secret_key.clone(),
        config.registration_timeout,
    )
    .context("failed to build registration client")?;

    if config.api_secret_key.is_none() {
        warn!("API_SECRET_KEY not set, protected endpoints will reject every request");
    }

    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard matches the JS/CSS assets
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(repo.clone()))
            .app_data(Data::new(config.clone()))
            .app_data(Data::new(registration.clone()))
            .service(index)
            .configure(|cfg| routes::configure(cfg, config.clone()))
    })
    .bind(&server_addr)
    .with_context(|| format!("failed to bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
