use actix_web::{web, HttpResponse};
use crate::api::error::ApiError;
use crate::api::server::ApiState;
use crate::zones::delete_distribution;

/// DELETE /delete/{id}
pub async fn delete(
    state: web::Data<ApiState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let distribution_id = path.into_inner();

    delete_distribution(state.store.as_ref(), distribution_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
