/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: 起動時に一度だけ作る token verifier（読み取り専用）
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::AccessTokenVerifier;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AccessTokenVerifier>,
}

impl AppState {
    pub fn new(auth: Arc<AccessTokenVerifier>) -> Self {
        Self { auth }
    }
}
