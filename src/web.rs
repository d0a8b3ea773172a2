// 🌐 Web Layer - axum router, handlers and error pages
//
// HTML pages for people, a small JSON API alongside. Every registry call
// goes through the `RegistryApi` in `AppState`, so tests swap in a fake.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::client::RegistryApi;
use crate::config::Config;
use crate::error::RegistryError;
use crate::events::Event;
use crate::flash::{clear_flash_cookie, flash_cookie, read_flash, FlashKey, IncomingFlash};
use crate::form::{dispatch, SearchForm};
use crate::lookup;
use crate::views::Views;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<dyn RegistryApi>,
    pub views: Arc<Views>,
    pub config: Arc<Config>,
    pub flash_key: FlashKey,
}

impl AppState {
    pub fn new(config: Config, registry: Arc<dyn RegistryApi>) -> Result<Self, minijinja::Error> {
        Ok(AppState {
            registry,
            views: Arc::new(Views::new()?),
            flash_key: FlashKey::from_secret(&config.secret_key),
            config: Arc::new(config),
        })
    }

    fn page_error(&self, error: impl Into<AppError>, flash: &IncomingFlash) -> PageError {
        PageError {
            views: self.views.clone(),
            error: error.into(),
            flash: flash.clone(),
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Registry(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            AppError::Registry(_) => StatusCode::BAD_GATEWAY,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show a visitor
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Registry(e) if e.is_not_found() => "No records found for that search.",
            AppError::Registry(_) => "The company register is unavailable right now. Please try again later.",
            AppError::Render(_) => "This page could not be displayed.",
        }
    }

    fn log(&self) {
        match self {
            AppError::Registry(e) if e.is_not_found() => info!(error = %e, "registry has no such record"),
            AppError::Registry(e) => warn!(error = %e, "registry call failed"),
            AppError::Render(e) => error!(error = %e, "template render failed"),
        }
    }
}

/// JSON API errors
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        (status, Json(ApiResponse::<()>::err(self.user_message()))).into_response()
    }
}

/// HTML errors: the same mapping, rendered with the error template.
/// A pending flash is shown here and consumed like on any other page.
pub struct PageError {
    views: Arc<Views>,
    error: AppError,
    flash: IncomingFlash,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        self.error.log();
        let status = self.error.status();

        let rendered = self
            .views
            .error(status.as_u16(), self.error.user_message(), self.flash.message.as_deref());

        let mut response = match rendered {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                error!(error = %e, "error page failed to render");
                (status, self.error.user_message()).into_response()
            }
        };
        if self.flash.present {
            response.headers_mut().append(header::SET_COOKIE, clear_flash_cookie());
        }
        response
    }
}

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

// ============================================================================
// FLASH EXTRACTOR
// ============================================================================

#[async_trait]
impl FromRequestParts<AppState> for IncomingFlash {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(read_flash(&state.flash_key, &parts.headers))
    }
}

/// HTML response that also consumes any flash cookie the request carried
fn page(html: String, flash: &IncomingFlash) -> Response {
    let mut response = Html(html).into_response();
    if flash.present {
        response.headers_mut().append(header::SET_COOKIE, clear_flash_cookie());
    }
    response
}

// ============================================================================
// PAGE HANDLERS
// ============================================================================

/// GET / - Default company if configured, otherwise the search page
async fn index(State(state): State<AppState>, flash: IncomingFlash) -> Result<Response, PageError> {
    match state.config.default_company.clone() {
        Some(company_number) => render_company(&state, &company_number, &flash).await,
        None => {
            let html = state
                .views
                .home(flash.message.as_deref())
                .map_err(|e| state.page_error(e, &flash))?;
            Ok(page(html, &flash))
        }
    }
}

/// GET /company/:company_number - Detail view with timeline
async fn company_page(
    State(state): State<AppState>,
    flash: IncomingFlash,
    Path(company_number): Path<String>,
) -> Result<Response, PageError> {
    render_company(&state, &company_number, &flash).await
}

async fn render_company(state: &AppState, company_number: &str, flash: &IncomingFlash) -> Result<Response, PageError> {
    let overview = lookup::company_overview(state.registry.as_ref(), company_number)
        .await
        .map_err(|e| state.page_error(e, flash))?;

    let html = state
        .views
        .company(&overview, flash.message.as_deref())
        .map_err(|e| state.page_error(e, flash))?;

    Ok(page(html, flash))
}

/// GET /officers/:officer_id/appointments
async fn appointments_page(
    State(state): State<AppState>,
    flash: IncomingFlash,
    Path(officer_id): Path<String>,
) -> Result<Response, PageError> {
    let appointments = lookup::officer_appointments(state.registry.as_ref(), &officer_id)
        .await
        .map_err(|e| state.page_error(e, &flash))?;

    let html = state
        .views
        .appointments(&officer_id, &appointments, flash.message.as_deref())
        .map_err(|e| state.page_error(e, &flash))?;

    Ok(page(html, &flash))
}

/// GET /search/officer/:query - Results ordered by birth date
async fn officer_search_page(
    State(state): State<AppState>,
    flash: IncomingFlash,
    Path(query): Path<String>,
) -> Result<Response, PageError> {
    let officers = lookup::officer_search(state.registry.as_ref(), &query, state.config.items_per_page)
        .await
        .map_err(|e| state.page_error(e, &flash))?;

    let html = state
        .views
        .officer_search(&query, &officers, flash.message.as_deref())
        .map_err(|e| state.page_error(e, &flash))?;

    Ok(page(html, &flash))
}

/// GET /search/company/:query
async fn company_search_page(
    State(state): State<AppState>,
    flash: IncomingFlash,
    Path(query): Path<String>,
) -> Result<Response, PageError> {
    let results = lookup::company_search(state.registry.as_ref(), &query, state.config.items_per_page)
        .await
        .map_err(|e| state.page_error(e, &flash))?;

    let html = state
        .views
        .company_search(&query, &results, flash.message.as_deref())
        .map_err(|e| state.page_error(e, &flash))?;

    Ok(page(html, &flash))
}

/// POST /handle_data - Route a search form submission
async fn handle_data(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Response {
    let outcome = dispatch(&form);
    info!(location = %outcome.location, rejected = outcome.flash.is_some(), "search form submitted");

    let mut response = Redirect::to(&outcome.location).into_response();
    if let Some(message) = &outcome.flash {
        if let Some(cookie) = flash_cookie(&state.flash_key, message) {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
    }
    response
}

// ============================================================================
// JSON API
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/company/:company_number/timeline - Merged timeline as JSON
async fn company_timeline(
    State(state): State<AppState>,
    Path(company_number): Path<String>,
) -> Result<Json<ApiResponse<Vec<Event>>>, AppError> {
    let overview = lookup::company_overview(state.registry.as_ref(), &company_number).await?;
    Ok(Json(ApiResponse::ok(overview.timeline)))
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/company/:company_number/timeline", get(company_timeline));

    Router::new()
        .route("/", get(index))
        .route("/company/:company_number", get(company_page))
        .route("/officers/:officer_id/appointments", get(appointments_page))
        .route("/search/officer/:query", get(officer_search_page))
        .route("/search/company/:query", get(company_search_page))
        .route("/handle_data", post(handle_data))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
