//! access token (HS256 JWT) 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <jwt>` を取り出して検証する
//! - header が無い / scheme が違う → MissingCredential (403)
//! - 検証失敗（署名・exp・payload）→ InvalidCredential (401)。原因はログにのみ残す

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::AccessTokenVerifier;
use crate::state::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Returns the token following the `Bearer` scheme, or `None` when the header
/// is absent or uses another scheme.
///
/// The scheme is matched on raw bytes. Once it matches, an empty token
/// (`"Bearer"`, `"Bearer "`) or one that is not valid UTF-8 is returned as
/// `Some("")` so it is judged as malformed rather than missing.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.as_bytes().trim_ascii_start();

    let scheme = value.get(..BEARER_SCHEME.len())?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME.as_bytes()) {
        return None;
    }

    let rest = &value[BEARER_SCHEME.len()..];
    match rest.first() {
        None => Some(""),
        Some(b' ') => Some(std::str::from_utf8(rest).map(str::trim).unwrap_or("")),
        // e.g. `Bearerabc`: a different scheme
        Some(_) => None,
    }
}

/// Stage 1 of the gate: credential → `AuthCtx`.
pub fn authenticate(
    verifier: &AccessTokenVerifier,
    headers: &HeaderMap,
) -> Result<AuthCtx, AppError> {
    let Some(token) = bearer_token(headers) else {
        tracing::debug!("request without bearer credential");
        return Err(AppError::MissingCredential);
    };

    if token.is_empty() {
        tracing::warn!("empty or unreadable bearer token");
        return Err(AppError::InvalidCredential);
    }

    verifier.verify(token).map_err(|err| {
        tracing::warn!(error = %err, "access token verification failed");
        AppError::InvalidCredential
    })
}

/// access middleware を route layer として適用する。
///
/// 単体で使わず `middleware::auth::protect` 経由で role 判定と組にする。
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_ctx = authenticate(&state.auth, req.headers())?;

    tracing::debug!(user_id = auth_ctx.user_id, role = %auth_ctx.role, "authenticated");

    // middleware → role middleware / extractor への受け渡し
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}
