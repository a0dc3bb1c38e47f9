/*
 * Responsibility
 * - GET /session: 提示された token が誰のものかを返す
 * - AuthCtx を読む handler の最小例（created_by の刻印なども同じ受け取り方）
 */
use axum::Json;

use crate::api::v1::extractors::{AuthCtx, AuthCtxExtractor};

pub async fn current_session(AuthCtxExtractor(auth_ctx): AuthCtxExtractor) -> Json<AuthCtx> {
    Json(auth_ctx)
}
