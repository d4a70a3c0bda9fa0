use actix_web::HttpResponse;

use crate::envelope::HealthStatus;

/// Liveness only: independent of the credential and the provider.
pub async fn handler() -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus::ok())
}
