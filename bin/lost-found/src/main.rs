//! # Lost & Found Binary
//!
//! The entry point that assembles the portal based on compile-time features.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use configs::Settings;
use lf_api::handlers::AppState;
use lf_api::middleware::{security_headers, standard_middleware};
use lf_core::Portal;

#[cfg(feature = "storage-local")]
use lf_storage_local::{DataUrlEncoder, LocalItemStore};

#[cfg(not(feature = "storage-local"))]
compile_error!("lost-found needs a storage plugin; enable the `storage-local` feature");

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // 1. Settings (lost-found.toml, LF__* variables)
    let settings = Settings::load()?;

    // 2. Initialize Storage and Media Implementations
    #[cfg(feature = "storage-local")]
    let (store, encoder) = (
        LocalItemStore::new(&settings.storage.data_dir, &settings.storage.slot),
        DataUrlEncoder::new(),
    );
    log::info!("items are stored in {}", store.path().display());

    // 3. Wrap in AppState (dynamic dispatch behind the core ports)
    let portal = Portal::new(Arc::new(store), Arc::new(encoder))
        .with_max_image_bytes(settings.media.max_image_bytes);
    let state = web::Data::new(AppState { portal });

    let (host, port) = settings.bind_addr();
    log::info!("Lost & Found listening on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(standard_middleware())
            .wrap(security_headers())
            .configure(lf_api::configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
