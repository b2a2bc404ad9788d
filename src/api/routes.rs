use actix_web::{web, HttpResponse};

use super::error::ApiError;
use super::handlers;
use super::state::ApiState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Health checks
        .route("/health", web::get().to(health_check))
        .route("/metrics", web::get().to(metrics_endpoint))

        // API v1
        .service(
            web::scope("/api/v1")
                .app_data(json_config())
                .service(
                    web::scope("/documents")
                        .route("", web::get().to(handlers::list_document_types))
                        .route("/{document_type}", web::post().to(handlers::generate_document)),
                ),
        );
}

/// Errores de deserialización con el mismo cuerpo JSON que el resto
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy"
    }))
}

async fn metrics_endpoint(state: web::Data<ApiState>) -> HttpResponse {
    match state.metrics.encode() {
        Ok(buffer) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(buffer),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
