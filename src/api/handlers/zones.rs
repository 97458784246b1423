use actix_web::{web, HttpResponse};
use crate::api::error::ApiError;
use crate::api::models::EditZoneRequest;
use crate::api::server::ApiState;
use crate::api::validators::parse_edit_request;
use crate::database::SessionMode;
use crate::zones::apply_edit;

/// POST /edit
pub async fn edit(
    state: web::Data<ApiState>,
    req: web::Json<EditZoneRequest>,
) -> Result<HttpResponse, ApiError> {
    let edit = parse_edit_request(req.into_inner()).map_err(ApiError::Validation)?;

    let mode = if state.settings.api.atomic_edits {
        SessionMode::Transaction
    } else {
        SessionMode::Direct
    };

    apply_edit(state.store.as_ref(), &edit, mode).await?;

    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::json;
    use std::sync::Arc;

    use crate::api::handlers::test_support::{state, BODY_LIMIT};
    use crate::api::models::ErrorResponse;
    use crate::api::server::configure;
    use crate::database::MemoryStore;

    #[actix_web::test]
    async fn test_rename_zone() {
        let store = MemoryStore::new();
        store.insert_zone(1, "old").await;
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(store.clone()), false))
                .configure(|cfg| configure(cfg, BODY_LIMIT)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/edit")
            .set_json(json!({"id": 1, "name": "new", "distributions": []}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(test::read_body(resp).await.is_empty());
        assert_eq!(store.zone(1).await.unwrap().name, "new");
    }

    #[actix_web::test]
    async fn test_create_distribution() {
        let store = MemoryStore::new();
        store.insert_zone(1, "old").await;
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(store.clone()), false))
                .configure(|cfg| configure(cfg, BODY_LIMIT)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/edit")
            .set_json(json!({"id": 1, "name": "x", "distributions": [{"percentage": 50}]}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let distributions = store.distributions(1).await;
        assert_eq!(distributions.len(), 1);
        assert_eq!(distributions[0].percentage, 50.0);
        assert_eq!(store.zone(1).await.unwrap().name, "x");
    }

    #[actix_web::test]
    async fn test_unknown_zone() {
        let store = MemoryStore::new();
        store.insert_zone(1, "old").await;
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(store.clone()), false))
                .configure(|cfg| configure(cfg, BODY_LIMIT)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/edit")
            .set_json(json!({"id": 999, "name": "x", "distributions": []}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(test::read_body(resp).await.is_empty());
        assert_eq!(store.zone(1).await.unwrap().name, "old");
    }

    #[actix_web::test]
    async fn test_unknown_distribution_keeps_earlier_writes() {
        let store = MemoryStore::new();
        store.insert_zone(1, "old").await;
        let existing = store.insert_distribution(1, 10.0).await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(store.clone()), false))
                .configure(|cfg| configure(cfg, BODY_LIMIT)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/edit")
            .set_json(json!({
                "id": 1,
                "name": "new",
                "distributions": [
                    {"id": existing.id, "percentage": 60},
                    {"id": 999, "percentage": 40}
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.distribution(existing.id).await.unwrap().percentage, 60.0);
        assert_eq!(store.zone(1).await.unwrap().name, "old");
    }

    #[actix_web::test]
    async fn test_atomic_edit_rolls_back() {
        let store = MemoryStore::new();
        store.insert_zone(1, "old").await;
        let existing = store.insert_distribution(1, 10.0).await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(store.clone()), true))
                .configure(|cfg| configure(cfg, BODY_LIMIT)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/edit")
            .set_json(json!({
                "id": 1,
                "name": "new",
                "distributions": [
                    {"id": existing.id, "percentage": 60},
                    {"percentage": 40},
                    {"id": 999, "percentage": 0}
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.distribution(existing.id).await.unwrap().percentage, 10.0);
        assert_eq!(store.distributions(1).await.len(), 1);
    }

    #[actix_web::test]
    async fn test_invalid_percentage() {
        let store = MemoryStore::new();
        store.insert_zone(1, "old").await;
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(store.clone()), false))
                .configure(|cfg| configure(cfg, BODY_LIMIT)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/edit")
            .set_json(json!({"id": 1, "name": "new", "distributions": [{"percentage": 150}]}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.error.contains("percentage"));
        assert!(store.distributions(1).await.is_empty());
        assert_eq!(store.zone(1).await.unwrap().name, "old");
    }

    #[actix_web::test]
    async fn test_missing_fields() {
        let store = MemoryStore::new();
        store.insert_zone(1, "old").await;
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(store.clone()), false))
                .configure(|cfg| configure(cfg, BODY_LIMIT)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/edit")
            .set_json(json!({"id": 1, "distributions": []}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.error.contains("name"));
    }

    #[actix_web::test]
    async fn test_oversized_body() {
        let store = MemoryStore::new();
        store.insert_zone(1, "old").await;
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(store.clone()), false))
                .configure(|cfg| configure(cfg, BODY_LIMIT)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/edit")
            .set_json(json!({"id": 1, "name": "n".repeat(BODY_LIMIT), "distributions": []}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(store.zone(1).await.unwrap().name, "old");
    }

    #[actix_web::test]
    async fn test_wrong_method() {
        let store = MemoryStore::new();
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(store), false))
                .configure(|cfg| configure(cfg, BODY_LIMIT)),
        )
        .await;

        let req = test::TestRequest::get().uri("/edit").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
