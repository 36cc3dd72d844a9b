//! # lf-api
//!
//! The web routing and orchestration layer for the lost & found portal.

pub mod handlers;
pub mod middleware;

use actix_web::web;

/// Configures the routes for the portal.
///
/// # Developer Note
/// Every action is a plain form post followed by a redirect, so the pages
/// work without any client-side script apart from the delete confirmation.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .route("/", web::get().to(handlers::index))
            // The listing with its four controls
            .route("/list", web::get().to(handlers::list_items))
            // The two report forms
            .route("/lost", web::get().to(handlers::lost_form))
            .route("/found", web::get().to(handlers::found_form))
            // The posting endpoint
            .route("/items", web::post().to(handlers::submit_item))
            // Card actions
            .route("/items/{id}/resolve", web::post().to(handlers::resolve_item))
            .route("/items/{id}/delete", web::post().to(handlers::delete_item)),
    );
}
