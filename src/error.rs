/*
 * Responsibility
 * - アプリ共通の AppError 定義（認証・認可ゲートの失敗）
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - 失敗ごとに status と payload の形は 1 対 1 で固定
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::api::v1::extractors::Role;
use crate::middleware::auth::RoleSet;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_roles: Option<RoleSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("no credential provided")]
    MissingCredential,
    #[error("invalid credential")]
    InvalidCredential,
    #[error("authentication required")]
    Unauthenticated,
    #[error("role {actual} is not permitted")]
    InsufficientRole { required: RoleSet, actual: Role },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredential => StatusCode::FORBIDDEN,
            AppError::InvalidCredential => StatusCode::UNAUTHORIZED,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::InsufficientRole { .. } => StatusCode::FORBIDDEN,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingCredential => "MissingCredential",
            AppError::InvalidCredential => "InvalidCredential",
            AppError::Unauthenticated => "Unauthenticated",
            AppError::InsufficientRole { .. } => "InsufficientRole",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = self.to_string();

        let (required_roles, actual_role) = match self {
            AppError::InsufficientRole { required, actual } => (Some(required), Some(actual)),
            _ => (None, None),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message,
                required_roles,
                actual_role,
            },
        };

        (status, Json(body)).into_response()
    }
}
