//! Public paste API.
//!
//! # Endpoints
//! - `POST /api/p`: create a paste from a form
//! - `GET /api/p/{id}`: paste as JSON
//! - `POST /api/p/{id}`: replace content of an editable paste
//! - `POST /api/p/{id}/auth`: exchange the paste password for an access cookie
//! - `GET /api/raw/{id}`: paste content as plain text

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Form, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::paste::{parse_ttl, unix_now, AuthSigner, PasswordHash, PasteId};
use crate::storage::Paste;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreatePasteForm {
    pub content: String,
    pub syntax: String,
    pub ttl: String,
    pub allow_edit: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdatePasteForm {
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthForm {
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PasteView {
    pub id: String,
    pub content: String,
    pub syntax: String,
    pub allow_edit: bool,
    /// 0 when the paste never expires.
    pub expires_at: i64,
}

fn form<T>(result: Result<Form<T>, FormRejection>) -> Result<T, ApiError> {
    match result {
        Ok(Form(value)) => Ok(value),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(ApiError::PayloadTooLarge)
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected form");
            Err(ApiError::BadForm)
        }
    }
}

impl AppState {
    /// Load a paste that exists and has not expired.
    async fn live_paste(&self, id: &str) -> Result<Paste, ApiError> {
        let paste = self.store.get(id).await?.ok_or(ApiError::NotFound)?;
        if paste.is_expired(unix_now()) {
            return Err(ApiError::Gone);
        }
        Ok(paste)
    }

    fn has_access(&self, jar: &CookieJar, paste: &Paste) -> bool {
        if !paste.is_protected() {
            return true;
        }
        jar.get(&AuthSigner::cookie_name(&paste.id))
            .is_some_and(|c| self.signer.verify(&paste.id, c.value()))
    }

    fn content_fits(&self, content: &str) -> bool {
        !content.is_empty() && content.len() <= self.limits.max_content_bytes
    }
}

pub async fn create_paste(
    State(state): State<AppState>,
    payload: Result<Form<CreatePasteForm>, FormRejection>,
) -> Result<Json<Created>, ApiError> {
    let input = form(payload)?;

    let content = input.content.trim();
    if !state.content_fits(content) {
        return Err(ApiError::InvalidContent);
    }
    let ttl = parse_ttl(&input.ttl).map_err(|_| ApiError::InvalidTtl)?;

    let now = unix_now();
    let expires_at = match ttl {
        Some(ttl) => Some(expiry_after(now, ttl).ok_or(ApiError::InvalidTtl)?),
        None => None,
    };
    let paste = Paste {
        id: PasteId::generate().into_string(),
        content: content.to_string(),
        syntax: if input.syntax.is_empty() {
            "auto".to_string()
        } else {
            input.syntax
        },
        allow_edit: input.allow_edit == "on",
        password: (!input.password.is_empty()).then(|| PasswordHash::new(&input.password)),
        created_at: now,
        expires_at,
    };

    state.store.insert(&paste).await?;
    metrics::record_created();
    tracing::info!(
        paste_id = %paste.id,
        protected = paste.is_protected(),
        expires_at = ?paste.expires_at,
        "Paste created"
    );

    Ok(Json(Created { id: paste.id }))
}

/// Unix time `ttl` after `now`, or `None` when it does not fit in an `i64`.
fn expiry_after(now: i64, ttl: std::time::Duration) -> Option<i64> {
    i64::try_from(ttl.as_secs())
        .ok()
        .and_then(|secs| now.checked_add(secs))
}

pub async fn get_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Result<Json<PasteView>, ApiError> {
    let paste = state.live_paste(&id).await?;
    if !state.has_access(&jar, &paste) {
        return Err(ApiError::Unauthorized);
    }

    Ok(Json(PasteView {
        id: paste.id,
        content: paste.content,
        syntax: paste.syntax,
        allow_edit: paste.allow_edit,
        expires_at: paste.expires_at.unwrap_or(0),
    }))
}

pub async fn get_raw(
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let paste = state.live_paste(&id).await?;
    if !state.has_access(&jar, &paste) {
        return Err(ApiError::Unauthorized);
    }
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        paste.content,
    ))
}

pub async fn update_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: CookieJar,
    payload: Result<Form<UpdatePasteForm>, FormRejection>,
) -> Result<StatusCode, ApiError> {
    let paste = state.live_paste(&id).await?;
    if !paste.allow_edit {
        return Err(ApiError::Forbidden);
    }
    if !state.has_access(&jar, &paste) {
        return Err(ApiError::Unauthorized);
    }

    let input = form(payload)?;
    if !state.content_fits(&input.content) {
        return Err(ApiError::InvalidContent);
    }

    state.store.update_content(&id, &input.content).await?;
    tracing::info!(paste_id = %id, "Paste edited");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn auth_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: CookieJar,
    payload: Result<Form<AuthForm>, FormRejection>,
) -> Result<(CookieJar, StatusCode), ApiError> {
    let paste = state.live_paste(&id).await?;
    let Some(password) = &paste.password else {
        return Err(ApiError::NoPassword);
    };

    let input = form(payload)?;
    if !password.verify(&input.password) {
        tracing::warn!(paste_id = %id, "Wrong paste password");
        return Err(ApiError::Unauthorized);
    }

    let cookie = Cookie::build((AuthSigner::cookie_name(&id), state.signer.sign(&id)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(state.cookie_max_age_secs))
        .build();

    Ok((jar.add(cookie), StatusCode::NO_CONTENT))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
