use crate::{
    api::{dashboard, employee, export, register, settings, sync},
    config::Config,
    error::ApiError,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond((60_000 / requests_per_min as u64).max(1))
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap_or_default();
        Governor::new(&cfg)
    }

    let sync_limiter = Arc::new(build_limiter(config.rate_sync_per_min));
    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));

    // recognition clients do not always send a content type
    cfg.app_data(
        web::JsonConfig::default()
            .content_type_required(false)
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    );

    cfg.service(
        web::scope(&config.api_prefix)
            // writes, guarded by x-api-key
            .service(
                web::resource("/sync")
                    .wrap(sync_limiter)
                    .route(web::post().to(sync::sync_event)),
            )
            .service(
                web::resource("/register-employee")
                    .wrap(register_limiter)
                    .route(web::post().to(register::register_employee)),
            )
            .service(
                web::resource("/settings")
                    .route(web::get().to(settings::get_settings))
                    .route(web::put().to(settings::update_settings)),
            )
            // reads
            .service(web::resource("/employees").route(web::get().to(employee::list_employees)))
            .service(
                web::resource("/employees/{name}").route(web::get().to(employee::get_employee)),
            )
            .service(web::resource("/export").route(web::get().to(export::export)))
            .service(web::resource("/dashboard").route(web::get().to(dashboard::dashboard)))
            .service(web::resource("/logs").route(web::get().to(dashboard::list_logs))),
    );
}
