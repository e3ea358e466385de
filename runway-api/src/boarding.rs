use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use runway_core::StyleReference;
use runway_pass::{OutputFormat, RenderedPass, StyleCatalogue};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/boarding_pass/{booking_id}", get(get_boarding_pass_preferred))
        .route("/boarding_pass/{booking_id}/{style}", get(get_boarding_pass))
        .route("/boarding_pass_pdf/{booking_id}", get(get_boarding_pass_pdf_preferred))
        .route("/boarding_pass_pdf/{booking_id}/{style}", get(get_boarding_pass_pdf))
        .route("/boarding_styles", get(list_boarding_styles))
}

/// GET /api/boarding_pass/{booking_id}/{style}
async fn get_boarding_pass(
    State(state): State<AppState>,
    Path((booking_id, style)): Path<(String, String)>,
) -> Result<Response, AppError> {
    render(&state, &booking_id, Some(&style), OutputFormat::Png).await
}

/// GET /api/boarding_pass_pdf/{booking_id}/{style}
async fn get_boarding_pass_pdf(
    State(state): State<AppState>,
    Path((booking_id, style)): Path<(String, String)>,
) -> Result<Response, AppError> {
    render(&state, &booking_id, Some(&style), OutputFormat::Pdf).await
}

/// GET /api/boarding_pass/{booking_id}
async fn get_boarding_pass_preferred(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Response, AppError> {
    render(&state, &booking_id, None, OutputFormat::Png).await
}

/// GET /api/boarding_pass_pdf/{booking_id}
async fn get_boarding_pass_pdf_preferred(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Response, AppError> {
    render(&state, &booking_id, None, OutputFormat::Pdf).await
}

/// GET /api/boarding_styles
async fn list_boarding_styles(
    State(state): State<AppState>,
) -> Result<Json<StyleCatalogue>, AppError> {
    let catalogue = state
        .passes
        .available_styles()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(catalogue))
}

async fn render(
    state: &AppState,
    booking_id: &str,
    style: Option<&str>,
    format: OutputFormat,
) -> Result<Response, AppError> {
    info!(booking_id, style, format = format.extension(), "Boarding pass requested");

    let pass = match style {
        Some(style) => {
            state
                .passes
                .render(booking_id, &StyleReference::parse(style), format)
                .await?
        }
        None => state.passes.render_preferred(booking_id, format).await?,
    };

    Ok(file_response(pass))
}

fn file_response(pass: RenderedPass) -> Response {
    let disposition = format!("inline; filename=\"{}\"", pass.filename);
    (
        [
            (header::CONTENT_TYPE, pass.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pass.bytes,
    )
        .into_response()
}
