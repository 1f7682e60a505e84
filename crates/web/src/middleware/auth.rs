use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use storage::repository::auth::SessionRepository;

use crate::error::WebError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "fitsession";

/// Authenticated caller, resolved from the session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

/// Middleware that requires a valid session token.
///
/// The token is read from the session cookie first, then from a bearer
/// `Authorization` header, and resolved against the sessions table. Expired
/// or unknown tokens are rejected without touching the request further.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = if let Some(cookie) = jar.get(SESSION_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header {
            Some(h) if h.starts_with("Bearer ") => h[7..].to_string(),
            _ => return Err(WebError::Unauthorized),
        }
    };

    let session = SessionRepository::new(state.db.pool())
        .find_valid(&token, Utc::now())
        .await?
        .ok_or(WebError::Unauthorized)?;

    request.extensions_mut().insert(AuthUser {
        user_id: session.user_id,
    });

    Ok(next.run(request).await)
}
