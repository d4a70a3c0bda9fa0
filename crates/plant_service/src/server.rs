use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpServer};
use anyhow::Context;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::handlers;
use crate::middleware::RequestTracing;
use crate::state::AppState;

/// Routes under `/api`. Callers provide `web::Data<AppState>`.
pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::Validation(format!("Invalid query string: {err}")).into()
    }))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health::handler))
            .route(
                "/identify-plant",
                web::post().to(handlers::identify::handler),
            ),
    );
}

fn cors(origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(origin)
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static(
            crate::middleware::REQUEST_ID_HEADER,
        )])
        .supports_credentials()
        .max_age(3600)
}

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let state = web::Data::new(
        AppState::new(&config).context("Failed to initialize identification client")?,
    );
    let live = state.is_live();
    let bind_address = config.bind_address();
    let cors_origin = config.cors_origin.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors(&cors_origin))
            .wrap(RequestTracing)
            .configure(app_config)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind server to {bind_address}"))?
    .run();

    tracing::info!("Backend server listening on http://{}", bind_address);
    tracing::info!("Health check: http://{}/api/health", bind_address);
    tracing::info!("Upload endpoint: POST http://{}/api/identify-plant", bind_address);
    tracing::info!(
        "API key: {}",
        if live {
            "configured"
        } else {
            "not configured, serving demo data"
        }
    );
    tracing::info!("CORS origin: {}", config.cors_origin);

    server.await.context("Web server error")
}
