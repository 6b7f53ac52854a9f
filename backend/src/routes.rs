use std::time::Instant;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, HttpResponseBuilder, Responder, ResponseError};
use log::{error, info, warn};

use crate::error::AppError;
use crate::models::{ApiResponse, PredictionRequest, PredictionResponse};
use crate::page::{self, Outcome};
use crate::AppState;

/// Validate, classify off the async worker, and read the label.
pub async fn run_prediction(
    state: &web::Data<AppState>,
    request: PredictionRequest,
) -> Result<PredictionResponse, AppError> {
    request.validate()?;

    let classifier = state.classifier.clone();
    let features = request.to_array();
    let label = web::block(move || classifier.classify(&features)).await??;

    let verdict = state.policy.verdict(&label, state.classifier.classes())?;
    Ok(PredictionResponse {
        message: page::headline(verdict).to_string(),
        label,
        verdict,
    })
}

pub async fn index() -> impl Responder {
    html(HttpResponse::Ok(), page::render_page(&PredictionRequest::default(), None))
}

pub async fn submit(
    state: web::Data<AppState>,
    form: web::Form<PredictionRequest>,
) -> impl Responder {
    let request = form.into_inner();
    info!("Form submission received");

    let (status, outcome) = match run_prediction(&state, request.clone()).await {
        Ok(result) => {
            info!("Prediction: label={} verdict={:?}", result.label, result.verdict);
            (StatusCode::OK, Outcome::Verdict(result.verdict))
        }
        Err(e @ AppError::Validation(_)) => {
            warn!("Validation failed: {}", e);
            (e.status_code(), Outcome::Invalid(e.to_string()))
        }
        Err(e) => {
            error!("Prediction error: {}", e);
            (e.status_code(), Outcome::Failed(e.to_string()))
        }
    };

    html(
        HttpResponse::build(status),
        page::render_page(&request, Some(&outcome)),
    )
}

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success("✅ Hypothyroid prediction API"))
}

pub async fn model_info(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success(state.classifier.describe()))
}

pub async fn predict(
    state: web::Data<AppState>,
    req: web::Json<PredictionRequest>,
) -> Result<HttpResponse, AppError> {
    let start_time = Instant::now();
    info!("New prediction request received");

    let result = match run_prediction(&state, req.into_inner()).await {
        Ok(result) => result,
        Err(e @ AppError::Validation(_)) => {
            warn!("Validation failed: {}", e);
            return Err(e);
        }
        Err(e) => {
            error!("Prediction error: {}", e);
            return Err(e);
        }
    };

    info!("Prediction succeeded: label={}", result.label);
    Ok(HttpResponse::Ok().json(ApiResponse::success(result).timed(start_time)))
}

pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(ApiResponse::<String>::error("Endpoint not found"))
}

fn html(mut builder: HttpResponseBuilder, body: String) -> HttpResponse {
    builder.content_type(ContentType::html()).body(body)
}
