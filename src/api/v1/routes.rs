/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 公開 route と、RoleSet ごとに protect() をかけた route group を merge する
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{health::health, session::current_session};
use crate::middleware::auth::{self, ADMIN_OR_LAB_TECHNICIAN};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/health", get(health));

    let signed_in = auth::protect(
        Router::new().route("/session", get(current_session)),
        state,
        ADMIN_OR_LAB_TECHNICIAN,
    );

    public.merge(signed_in)
}
