//! Request authentication + role authorization gate.
//!
//! Two stages run per request, in this order:
//! 1. `access`: bearer token → verified `AuthCtx` in request extensions
//! 2. `role`: `AuthCtx.role` ∈ the route's `RoleSet`
//!
//! Each stage returns `Result<Response, AppError>`; the first `Err` is the
//! response and nothing after it runs.

pub mod access;
pub mod role;

use axum::Router;

use crate::state::AppState;

pub use role::{ADMIN_ONLY, ADMIN_OR_LAB_TECHNICIAN, LAB_TECHNICIAN_ONLY, RoleSet};

/// Guard every route in `router` with the gate.
///
/// The role layer is added first so it ends up inside the access layer;
/// axum runs the outermost layer first, which keeps stage 1 ahead of stage 2.
///
/// ```ignore
/// let products = Router::new().route("/products", post(create_product));
/// let products = middleware::auth::protect(products, state.clone(), ADMIN_ONLY);
/// ```
pub fn protect(router: Router<AppState>, state: AppState, permitted: RoleSet) -> Router<AppState> {
    let router = role::apply(router, permitted);
    access::apply(router, state)
}
