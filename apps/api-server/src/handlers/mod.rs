//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;
mod users;


use actix_web::web;

use crate::middleware::error::extractor_error;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| extractor_error(err, req)))
        .app_data(web::FormConfig::default().error_handler(|err, req| extractor_error(err, req)))
        .app_data(web::PathConfig::default().error_handler(|err, req| extractor_error(err, req)))
        .app_data(web::QueryConfig::default().error_handler(|err, req| extractor_error(err, req)))
        .route("/health", web::get().to(health::health_check))
        .route("/login", web::post().to(auth::login))
        .service(
            web::scope("/users")
                .route("", web::post().to(users::create_user))
                .route("/{id}", web::get().to(users::get_user)),
        )
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::list_posts))
                .route("", web::post().to(posts::create_post))
                .route("/{id}", web::get().to(posts::get_post))
                .route("/{id}", web::put().to(posts::update_post))
                .route("/{id}", web::delete().to(posts::delete_post)),
        );
}
