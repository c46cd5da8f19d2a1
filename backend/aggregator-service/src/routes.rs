//! Route configuration
//!
//! Protected handlers declare the `AuthedUser` extractor; everything else is
//! public. Malformed JSON payloads are shaped into the same `{"error": ...}`
//! body the rest of the taxonomy produces.

use actix_web::web;

use crate::error::AppError;
use crate::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidArgument(err.to_string()).into()),
    )
    .service(
        web::scope("/v1")
            .route("/healthz", web::get().to(handlers::health::healthz))
            .route("/err", web::get().to(handlers::health::err))
            .service(
                web::resource("/users")
                    .route(web::post().to(handlers::users::create_user))
                    .route(web::get().to(handlers::users::get_current_user)),
            )
            .service(
                web::resource("/feeds")
                    .route(web::post().to(handlers::feeds::create_feed))
                    .route(web::get().to(handlers::feeds::list_feeds)),
            )
            .service(
                web::resource("/feed_follows")
                    .route(web::post().to(handlers::feed_follows::create_feed_follow))
                    .route(web::get().to(handlers::feed_follows::list_feed_follows)),
            )
            .route(
                "/feed_follows/{feed_follow_id}",
                web::delete().to(handlers::feed_follows::delete_feed_follow),
            ),
    );
}
