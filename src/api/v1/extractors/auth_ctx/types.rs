/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 * - ここは「型（契約）」として固定化する
 */
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse-grained role carried in the `role` claim.
///
/// On the wire a role is its integer id; ids outside this enum are rejected
/// while decoding the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Role {
    Administrator,
    LabTechnician,
}

impl Role {
    pub const fn id(self) -> i64 {
        match self {
            Role::Administrator => 1,
            Role::LabTechnician => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown role id: {0}")]
pub struct UnknownRole(pub i64);

impl TryFrom<i64> for Role {
    type Error = UnknownRole;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Role::Administrator),
            2 => Ok(Role::LabTechnician),
            other => Err(UnknownRole(other)),
        }
    }
}

impl From<Role> for i64 {
    fn from(role: Role) -> Self {
        role.id()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Administrator => f.write_str("administrator"),
            Role::LabTechnician => f.write_str("lab_technician"),
        }
    }
}

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は token の `id` claim
/// - `role` は token の `role` claim（認可はこの値だけで判断する）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthCtx {
    pub user_id: i64,
    pub role: Role,
}

impl AuthCtx {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }
}
