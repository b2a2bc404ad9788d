use actix_web::{web, HttpResponse};
use serde_json::json;

use super::error::{ApiError, ApiResult};
use super::state::ApiState;
use crate::models::{DocumentType, LoanRequest};

/// Tipos de documento disponibles con los campos que exige cada uno
pub async fn list_document_types(state: web::Data<ApiState>) -> HttpResponse {
    let registry = state.generator.registry();

    let documents: Vec<_> = registry
        .list()
        .into_iter()
        .filter_map(|(document_type, description)| {
            registry.get(document_type).map(|template| {
                let required: Vec<&str> = template.required_fields().iter().map(|f| f.as_str()).collect();
                json!({
                    "document_type": document_type,
                    "description": description,
                    "required_fields": required,
                })
            })
        })
        .collect();

    HttpResponse::Ok().json(json!({ "documents": documents }))
}

/// Genera el documento y lo devuelve como `application/pdf`
pub async fn generate_document(
    path: web::Path<String>,
    body: web::Json<LoanRequest>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    let raw_type = path.into_inner();

    let document_type: DocumentType = raw_type.parse().map_err(|e: crate::core::DocumentError| {
        state.metrics.record_failed("unknown", e.kind());
        ApiError::from(e)
    })?;

    let generator = state.generator.clone();
    let request = body.into_inner();

    // La generación bloquea (proceso externo y E/S de ficheros)
    let result = tokio::task::spawn_blocking(move || generator.generate(document_type, &request)).await?;

    match result {
        Ok(document) => {
            state.metrics.record_generated(document_type, &document.overlay);

            Ok(HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header(("X-Overlay-Status", document.overlay.as_str()))
                .insert_header((
                    "Content-Disposition",
                    format!("inline; filename=\"{}.pdf\"", document_type),
                ))
                .body(document.pdf))
        }
        Err(e) => {
            state.metrics.record_failed(document_type.as_str(), e.kind());
            Err(e.into())
        }
    }
}
