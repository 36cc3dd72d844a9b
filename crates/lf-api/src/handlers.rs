//! # lf-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the `Portal`
//! command handlers. Pages are rendered by lf-ui.

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpResponse, Responder};
use askama::Template;
use futures_util::TryStreamExt;
use lf_core::models::{ImageUpload, ItemKind, RawSubmission};
use lf_core::{AppError, Portal};
use lf_ui::{ItemFormTemplate, ListControls, ListTemplate};
use thiserror::Error;

/// Cap on any single text field of the submit form.
pub const MAX_TEXT_FIELD_BYTES: usize = 16 * 1024;

/// State shared across all Actix-web workers.
pub struct AppState {
    pub portal: Portal,
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn render<T: Template>(page: T, status: StatusCode) -> HttpResponse {
    match page.render() {
        Ok(html) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            log::error!("template rendering failed: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// "/" just sends people to the listing.
pub async fn index() -> impl Responder {
    see_other("/list")
}

/// Renders the filtered, sorted listing (e.g., /list?type=lost&sort=newest)
pub async fn list_items(
    data: web::Data<AppState>,
    controls: web::Query<ListControls>,
) -> impl Responder {
    let controls = controls.into_inner();
    let shown = data.portal.on_filter_change(&controls.to_query());
    let all = data.portal.repository().list();
    render(ListTemplate::new(&controls, &all, &shown), StatusCode::OK)
}

pub async fn lost_form() -> impl Responder {
    render(ItemFormTemplate::new(ItemKind::Lost), StatusCode::OK)
}

pub async fn found_form() -> impl Responder {
    render(ItemFormTemplate::new(ItemKind::Found), StatusCode::OK)
}

/// Orchestrates the creation of a new posting from the multipart form.
pub async fn submit_item(data: web::Data<AppState>, payload: Multipart) -> impl Responder {
    let (raw, image) = match read_submission(payload, data.portal.max_image_bytes()).await {
        Ok(parts) => parts,
        Err(e @ FormError::FieldTooLarge(_)) => {
            log::warn!("rejecting submission: {}", e);
            return HttpResponse::PayloadTooLarge().body("form field too large");
        }
        Err(e) => {
            log::warn!("rejecting malformed submission: {}", e);
            return HttpResponse::BadRequest().body("malformed form data");
        }
    };

    match data.portal.on_submit(raw.clone(), image).await {
        Ok(item) => see_other(&format!("/list?submitted={}", item.kind)),
        Err(AppError::ValidationError(field)) => render(
            ItemFormTemplate::rejected(&raw, format!("Please provide {field}.")),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        Err(e) => {
            log::error!("submission failed: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// POST /items/{id}/resolve. Unknown ids are a silent no-op.
pub async fn resolve_item(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match data.portal.on_resolve(&path.into_inner()) {
        Ok(_) => see_other("/list"),
        Err(e) => {
            log::error!("resolve failed: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// POST /items/{id}/delete. The page asks for confirmation before posting.
pub async fn delete_item(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match data.portal.on_delete(&path.into_inner()) {
        Ok(_) => see_other("/list"),
        Err(e) => {
            log::error!("delete failed: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Debug, Error)]
enum FormError {
    #[error("malformed multipart body: {0}")]
    Multipart(MultipartError),
    #[error("form field {0:?} is over the size limit")]
    FieldTooLarge(String),
}

impl From<MultipartError> for FormError {
    fn from(err: MultipartError) -> Self {
        FormError::Multipart(err)
    }
}

/// Buffers `field` up to `limit` bytes. `None` means it ran over; the rest
/// of the field is left unread.
async fn read_capped(field: &mut Field, limit: usize) -> Result<Option<Vec<u8>>, MultipartError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        if data.len() + chunk.len() > limit {
            return Ok(None);
        }
        data.extend_from_slice(&chunk);
    }
    Ok(Some(data))
}

/// Collects the named form fields and the optional `image` file.
///
/// An image over `image_limit` is skipped without being buffered, so the
/// item is still created, just without it.
async fn read_submission(
    mut payload: Multipart,
    image_limit: usize,
) -> Result<(RawSubmission, Option<ImageUpload>), FormError> {
    let mut raw = RawSubmission::default();
    let mut image = None;

    while let Some(mut field) = payload.try_next().await? {
        let disposition = field.content_disposition();
        let name = disposition.get_name().unwrap_or_default().to_string();
        let file_name = disposition.get_filename().map(str::to_string);
        let content_type = field.content_type().map(|m| m.to_string());

        if name == "image" {
            match read_capped(&mut field, image_limit).await? {
                Some(data) => {
                    image = Some(ImageUpload {
                        file_name,
                        content_type,
                        data,
                    })
                }
                None => {
                    log::warn!(
                        "image {:?} is over the {} byte limit; submitting without it",
                        file_name,
                        image_limit
                    );
                    while field.try_next().await?.is_some() {}
                    image = None;
                }
            }
            continue;
        }

        let Some(data) = read_capped(&mut field, MAX_TEXT_FIELD_BYTES).await? else {
            return Err(FormError::FieldTooLarge(name));
        };

        let value = Some(String::from_utf8_lossy(&data).into_owned());
        match name.as_str() {
            "type" => raw.kind = value,
            "name" => raw.name = value,
            "category" => raw.category = value,
            "description" => raw.description = value,
            "location" => raw.location = value,
            "date" => raw.date = value,
            "contact" => raw.contact = value,
            other => log::debug!("ignoring unknown form field {:?}", other),
        }
    }

    Ok((raw, image))
}
