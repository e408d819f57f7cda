//! Front dispatcher.
//!
//! Maps the `action` query parameter to exactly one controller call. There
//! is no state carried between requests: one request, one call, one page.

use std::fmt;
use std::str::FromStr;

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Query, State,
    },
    http::Method,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::debug;

use common::{AppError, AppResult};
use domain::{parse_user_id, NewUser, UserId};

use crate::controllers::UserController;
use crate::state::AppState;
use crate::views;

/// Controller operations reachable through the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Profile,
    List,
    Save,
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profile" => Ok(Action::Profile),
            "list" => Ok(Action::List),
            "save" => Ok(Action::Save),
            other => Err(AppError::bad_request(format!("Unknown action: {}", other))),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Profile => write!(f, "profile"),
            Action::List => write!(f, "list"),
            Action::Save => write!(f, "save"),
        }
    }
}

/// Raw query parameters understood by the dispatcher.
///
/// Kept as strings so malformed values produce our own messages instead of
/// a generic extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DispatchQuery {
    pub action: Option<String>,
    pub id: Option<String>,
}

impl DispatchQuery {
    /// Requested action; a missing action means `list`.
    pub fn action(&self) -> AppResult<Action> {
        match self.action.as_deref() {
            None | Some("") => Ok(Action::List),
            Some(raw) => raw.parse(),
        }
    }

    /// Positive identifier, required by `profile`.
    pub fn require_id(&self) -> AppResult<UserId> {
        let raw = self
            .id
            .as_deref()
            .ok_or_else(|| AppError::bad_request("Missing id"))?;
        Ok(parse_user_id(raw)?)
    }
}

/// Route one request to one controller method.
///
/// `form` is `None` for requests without a body (GET).
pub async fn dispatch(
    controller: &UserController,
    method: &Method,
    query: &DispatchQuery,
    form: Option<AppResult<NewUser>>,
) -> AppResult<Response> {
    let action = query.action()?;
    debug!(%action, %method, "dispatching");

    match (action, method) {
        (Action::Profile, &Method::GET) => {
            let id = query.require_id()?;
            Ok(controller.profile(id).await?.into_response())
        }
        (Action::List, &Method::GET) => Ok(controller.list().await?.into_response()),
        (Action::Save, &Method::POST) => {
            let new_user = form.ok_or_else(|| AppError::bad_request("Missing form body"))??;
            Ok(controller.save(new_user).await?.into_response())
        }
        (action, method) => Err(AppError::method_not_allowed(format!(
            "action {} does not accept {}",
            action, method
        ))),
    }
}

/// Error rendered as an HTML page instead of the JSON error body.
#[derive(Debug)]
pub struct HtmlError(pub AppError);

impl From<AppError> for HtmlError {
    fn from(err: AppError) -> Self {
        HtmlError(err)
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let message = self.0.user_message();
        (status, Html(views::error_page(status, &message))).into_response()
    }
}

/// Unwrap the query string, reporting a rejection on the HTML error page.
fn dispatch_query(
    query: Result<Query<DispatchQuery>, QueryRejection>,
) -> AppResult<DispatchQuery> {
    query
        .map(|Query(query)| query)
        .map_err(|e| AppError::bad_request(e.body_text()))
}

/// `GET /?action=...`
pub async fn dispatch_get(
    State(state): State<AppState>,
    query: Result<Query<DispatchQuery>, QueryRejection>,
) -> Result<Response, HtmlError> {
    let query = dispatch_query(query)?;
    let controller = state.user_controller();
    Ok(dispatch(&controller, &Method::GET, &query, None).await?)
}

/// `POST /?action=save` with a `name`/`email` form body
pub async fn dispatch_post(
    State(state): State<AppState>,
    query: Result<Query<DispatchQuery>, QueryRejection>,
    form: Result<Form<NewUser>, FormRejection>,
) -> Result<Response, HtmlError> {
    let query = dispatch_query(query)?;
    let form = form
        .map(|Form(new_user)| new_user)
        .map_err(|e| AppError::bad_request(e.body_text()));

    let controller = state.user_controller();
    Ok(dispatch(&controller, &Method::POST, &query, Some(form)).await?)
}
