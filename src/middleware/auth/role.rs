//! role 判定 (stage 2)
//!
//! access middleware が入れた AuthCtx の role が、route 登録時に宣言した
//! RoleSet に含まれるかだけを見る。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};
use serde::Serialize;

use crate::api::v1::extractors::{AuthCtx, Role};
use crate::error::AppError;

/// Roles permitted to reach a protected route. Never empty.
///
/// Serialized as the list of role ids in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleSet(&'static [Role]);

impl RoleSet {
    pub const fn new(roles: &'static [Role]) -> Self {
        assert!(!roles.is_empty(), "permitted role set must not be empty");
        Self(roles)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn roles(&self) -> &'static [Role] {
        self.0
    }
}

pub const ADMIN_ONLY: RoleSet = RoleSet::new(&[Role::Administrator]);
pub const LAB_TECHNICIAN_ONLY: RoleSet = RoleSet::new(&[Role::LabTechnician]);
pub const ADMIN_OR_LAB_TECHNICIAN: RoleSet =
    RoleSet::new(&[Role::Administrator, Role::LabTechnician]);

/// Stage 2 of the gate.
///
/// `None` means stage 1 never ran for this request; that is a wiring bug and
/// is denied.
pub fn authorize(auth_ctx: Option<&AuthCtx>, permitted: RoleSet) -> Result<(), AppError> {
    let Some(auth_ctx) = auth_ctx else {
        tracing::error!("role check reached without AuthCtx; access middleware missing");
        return Err(AppError::Unauthenticated);
    };

    if permitted.contains(auth_ctx.role) {
        return Ok(());
    }

    tracing::warn!(
        user_id = auth_ctx.user_id,
        role = %auth_ctx.role,
        permitted = ?permitted.roles(),
        "role not permitted"
    );

    Err(AppError::InsufficientRole {
        required: permitted,
        actual: auth_ctx.role,
    })
}

pub fn apply<S>(router: Router<S>, permitted: RoleSet) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(permitted, role_middleware))
}

async fn role_middleware(
    State(permitted): State<RoleSet>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    authorize(req.extensions().get::<AuthCtx>(), permitted)?;
    Ok(next.run(req).await)
}
