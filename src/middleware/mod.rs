/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: 認証 + role 認可ゲート / http: request id, trace, limit, timeout
 */
pub mod auth;
pub mod http;
