use actix_web::{web, HttpResponse};
use crate::api::models::HealthResponse;
use crate::api::server::ApiState;
use chrono::Utc;
use tracing::error;

pub async fn health(
    state: web::Data<ApiState>,
) -> actix_web::Result<HttpResponse> {
    let db_healthy = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            error!("Health check failed: {}", e);
            false
        }
    };

    let response = HealthResponse {
        status: if db_healthy { "healthy" } else { "degraded" }.to_string(),
        database: if db_healthy { "healthy" } else { "unhealthy" }.to_string(),
        timestamp: Utc::now(),
    };

    if db_healthy {
        Ok(HttpResponse::Ok().json(response))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(response))
    }
}
