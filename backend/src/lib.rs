//! Web surface of the hypothyroid risk screening service: one HTML form,
//! its result page, and a small JSON API over the same prediction path.

pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod page;
pub mod routes;

use std::sync::Arc;

use actix_web::error::{InternalError, JsonPayloadError, UrlencodedError};
use actix_web::http::header::ContentType;
use actix_web::{web, HttpRequest, HttpResponse};
use thyroid_inferences::{Classifier, LabelPolicy};

use crate::models::{ApiResponse, PredictionRequest};
use crate::page::Outcome;

/// Process-wide state, built once before the server starts.
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
    pub policy: LabelPolicy,
}

impl AppState {
    pub fn new(classifier: Arc<dyn Classifier>, policy: LabelPolicy) -> Self {
        Self { classifier, policy }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(64 * 1024)
            .error_handler(json_error),
    )
    .app_data(web::FormConfig::default().error_handler(form_error))
    .service(
        web::resource("/")
            .route(web::get().to(routes::index))
            .route(web::post().to(routes::submit)),
    )
    .service(
        web::scope("/api")
            .route("/health", web::get().to(routes::health_check))
            .route("/model-info", web::get().to(routes::model_info))
            .route("/predict", web::post().to(routes::predict)),
    );
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error(&err.to_string()));
    InternalError::from_response(err, response).into()
}

/// A body that does not deserialize cannot be echoed, so the page falls back
/// to the form defaults.
fn form_error(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    let outcome = Outcome::Invalid(err.to_string());
    let body = page::render_page(&PredictionRequest::default(), Some(&outcome));
    let response = HttpResponse::BadRequest()
        .content_type(ContentType::html())
        .body(body);
    InternalError::from_response(err, response).into()
}
