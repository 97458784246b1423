use crate::config::Settings;
use crate::database::ZoneStore;
use actix_web::{web, App, HttpServer, middleware};
use std::sync::Arc;
use anyhow::Result;
use tracing::{info, error};

use crate::api::error::{json_error_handler, path_error_handler};
use crate::api::handlers;

pub struct ApiState {
    pub store: Arc<dyn ZoneStore>,
    pub settings: Arc<Settings>,
}

/// Registers every route together with the extractor configuration they rely on.
pub fn configure(cfg: &mut web::ServiceConfig, max_body_bytes: usize) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(max_body_bytes)
            .error_handler(json_error_handler),
    )
    .app_data(web::PathConfig::default().error_handler(path_error_handler))
    .service(
        web::resource("/edit")
            .route(web::post().to(handlers::zones::edit)),
    )
    .service(
        web::resource("/delete/{id}")
            .route(web::delete().to(handlers::distributions::delete)),
    )
    .service(
        web::scope("/system")
            .route("/health", web::get().to(handlers::system::health)),
    );
}

pub async fn start(settings: Arc<Settings>, store: Arc<dyn ZoneStore>) -> Result<()> {
    let api_addr = settings.api.socket_addr()?;
    let max_body_bytes = settings.api.max_body_bytes;

    info!("Starting API server on {}", api_addr);
    if settings.api.atomic_edits {
        info!("Zone edits run inside a single transaction");
    }

    let state = web::Data::new(ApiState {
        store,
        settings: settings.clone(),
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(|cfg| configure(cfg, max_body_bytes))
    })
    .bind(api_addr)?
    .run();

    info!("API server listening on {}", api_addr);

    match server.await {
        Ok(_) => {
            info!("API server shutdown gracefully");
            Ok(())
        }
        Err(e) => {
            error!("API server error: {}", e);
            Err(anyhow::anyhow!("API server failed: {}", e))
        }
    }
}
