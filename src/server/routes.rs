//! Request handlers

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Form,
};
use std::sync::Arc;

use super::AppState;
use crate::error::SiteError;
use crate::mail::{ContactForm, RawContactForm};
use crate::templates::View;

/// Body returned after a contact message was handed to the relay
pub const CONFIRMATION: &str = "<h1>Successfully sent your message! </h1>";

type PageResult = Result<Html<String>, ErrorPage>;

/// A rendered error page with its status code
#[derive(Debug)]
pub struct ErrorPage {
    status: StatusCode,
    body: ErrorBody,
}

/// Plain text is used only when `error.html` itself fails to render
#[derive(Debug)]
enum ErrorBody {
    Html(String),
    Text(String),
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        match self.body {
            ErrorBody::Html(html) => (self.status, Html(html)).into_response(),
            ErrorBody::Text(text) => (self.status, text).into_response(),
        }
    }
}

impl AppState {
    /// Turn an error into a page the visitor can read
    pub fn error_page(&self, err: SiteError) -> ErrorPage {
        let status = err.status_code();
        if status.is_server_error() {
            tracing::error!("{}", err);
        } else {
            tracing::debug!("{}", err);
        }

        let message = err.public_message();
        let body = match self.renderer.render_error(status.as_u16(), &message) {
            Ok(html) => ErrorBody::Html(html),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                ErrorBody::Text(message)
            }
        };

        ErrorPage { status, body }
    }
}

/// GET / - every post, in source order
pub async fn list_posts(State(state): State<Arc<AppState>>) -> PageResult {
    state
        .renderer
        .render_index(state.store.all())
        .map(Html)
        .map_err(|e| state.error_page(e))
}

/// GET /about
pub async fn about_page(State(state): State<Arc<AppState>>) -> PageResult {
    render_page(&state, View::About)
}

/// GET /contact
pub async fn contact_page(State(state): State<Arc<AppState>>) -> PageResult {
    render_page(&state, View::Contact)
}

fn render_page(state: &AppState, view: View) -> PageResult {
    state
        .renderer
        .render_page(view)
        .map(Html)
        .map_err(|e| state.error_page(e))
}

/// GET /blogpost/:index
///
/// Anything that is not an index into the post list is a 404, including
/// signed, negative and non-numeric values.
pub async fn show_post(
    State(state): State<Arc<AppState>>,
    Path(index): Path<String>,
) -> PageResult {
    let post = parse_index(&index)
        .ok_or_else(|| SiteError::PostNotFound(index.clone()))
        .and_then(|i| state.store.get(i))
        .map_err(|e| state.error_page(e))?;

    state
        .renderer
        .render_post(post)
        .map(Html)
        .map_err(|e| state.error_page(e))
}

/// A post index is one or more ASCII digits and nothing else
fn parse_index(raw: &str) -> Option<usize> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// POST /form-entry - relay a contact form submission
pub async fn receive_form(
    State(state): State<Arc<AppState>>,
    form: Result<Form<RawContactForm>, FormRejection>,
) -> PageResult {
    let Form(raw) = form
        .map_err(|rejection| state.error_page(SiteError::InvalidForm(rejection.body_text())))?;
    let form = ContactForm::try_from(raw).map_err(|e| state.error_page(e))?;

    state
        .relay
        .relay(&form)
        .await
        .map_err(|e| state.error_page(e))?;

    Ok(Html(CONFIRMATION.to_string()))
}

/// Any other path
pub async fn not_found(State(state): State<Arc<AppState>>, uri: Uri) -> ErrorPage {
    state.error_page(SiteError::PageNotFound(uri.path().to_string()))
}

/// A known path requested with a method it does not serve
pub async fn method_not_allowed(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> ErrorPage {
    state.error_page(SiteError::MethodNotAllowed(format!(
        "{} {}",
        method,
        uri.path()
    )))
}
