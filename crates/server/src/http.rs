//! Inbound HTTP surface: the submission form, stored-roadmap pages, the
//! history listing and PDF download.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::Form;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use roadmap_core::form::{RoadmapForm, ValidationError};

use crate::pdf;
use crate::render::{self, FormBanner};
use crate::service::{RoadmapService, SubmitError};
use crate::session;
use crate::store::StoreError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    svc: Arc<RoadmapService>,
    session_secret: Arc<str>,
}

/// Build the application router.
pub fn router(svc: Arc<RoadmapService>, session_secret: String) -> Router {
    let state = AppState {
        svc,
        session_secret: session_secret.into(),
    };
    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(index))
        .route("/generate", post(generate))
        .route("/roadmaps", get(history))
        .route("/roadmaps/{id}", get(show))
        .route("/roadmaps/{id}/pdf", get(download_pdf))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn index(State(st): State<AppState>) -> Html<String> {
    Html(render::form_page(
        &session::issue(&st.session_secret),
        None,
        None,
    ))
}

async fn generate(State(st): State<AppState>, Form(form): Form<RoadmapForm>) -> Response {
    if !session::verify(&st.session_secret, &form.form_token) {
        return invalid_form(&st, &form, &ValidationError::BadFormToken);
    }

    match st.svc.submit(&form).await {
        Ok(result) => Html(render::roadmap_page(&result)).into_response(),
        Err(SubmitError::Validation(e)) => invalid_form(&st, &form, &e),
        Err(SubmitError::Generation(e)) => {
            tracing::warn!(error = %e, "generation failed");
            let status = if e.retryable() {
                StatusCode::SERVICE_UNAVAILABLE
            } else {
                StatusCode::BAD_GATEWAY
            };
            let banner = FormBanner::Failed {
                message: e.to_string(),
                retryable: e.retryable(),
            };
            (
                status,
                Html(render::form_page(
                    &session::issue(&st.session_secret),
                    Some(&banner),
                    Some(&form),
                )),
            )
                .into_response()
        }
        Err(SubmitError::Persistence(_)) => {
            // submit() already logged the recovery payload.
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render::message_page(
                    "Something went wrong",
                    "The roadmap was generated but could not be stored. \
                     The content has been logged; contact the operator to recover it.",
                )),
            )
                .into_response()
        }
    }
}

fn invalid_form(st: &AppState, form: &RoadmapForm, err: &ValidationError) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(render::form_page(
            &session::issue(&st.session_secret),
            Some(&FormBanner::Invalid(err)),
            Some(form),
        )),
    )
        .into_response()
}

async fn history(State(st): State<AppState>) -> Result<Html<String>, AppError> {
    let rows = st.svc.history()?;
    Ok(Html(render::list_page(&rows)))
}

async fn show(State(st): State<AppState>, Path(id): Path<String>) -> Response {
    match st.svc.fetch(&id) {
        Ok(result) => Html(render::roadmap_page(&result)).into_response(),
        Err(StoreError::NotFound(_)) => not_found(&id),
        Err(e) => AppError::from(e).into_response(),
    }
}

async fn download_pdf(State(st): State<AppState>, Path(id): Path<String>) -> Response {
    let result = match st.svc.fetch(&id) {
        Ok(result) => result,
        Err(StoreError::NotFound(_)) => return not_found(&id),
        Err(e) => return AppError::from(e).into_response(),
    };
    match pdf::roadmap_pdf(&result) {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"roadmap-{id}.pdf\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

fn not_found(id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(render::message_page(
            "Not found",
            &format!("No roadmap with id {id}."),
        )),
    )
        .into_response()
}

/// Backend failures map onto a generic 500 page; details go to the log,
/// not the client.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(value: E) -> Self {
        Self(value.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(render::message_page(
                "Something went wrong",
                "Unexpected server error.",
            )),
        )
            .into_response()
    }
}
