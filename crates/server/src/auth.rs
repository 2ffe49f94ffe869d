use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::warn;

use service::auth::{domain::{AuthSession, LoginInput}, AuthConfig, AuthService};
use service::employee::{Actor, Employee, EmployeeRepository, EmployeeService};

use crate::errors::JsonApiError;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerState {
    pub employees: Arc<EmployeeService<dyn EmployeeRepository>>,
    pub auth: Arc<AuthService<dyn EmployeeRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn EmployeeRepository>, auth: AuthConfig) -> Self {
        Self {
            employees: Arc::new(EmployeeService::new(Arc::clone(&repo))),
            auth: Arc::new(AuthService::new(repo, auth)),
        }
    }
}

#[utoipa::path(
    post, path = "/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = crate::openapi::SessionDoc),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<AuthSession>), JsonApiError> {
    let session = state.auth.login(input).await?;
    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    Ok((jar.add(cookie), Json(session)))
}

#[utoipa::path(
    post, path = "/auth/logout", tag = "auth",
    responses((status = 204, description = "Cookie cleared"))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/auth/me", tag = "auth",
    responses(
        (status = 200, description = "The authenticated employee", body = crate::openapi::EmployeeDoc),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Employee no longer exists")
    )
)]
pub async fn me(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Employee>, JsonApiError> {
    Ok(Json(state.employees.get(&actor, actor.id).await?))
}

/// Bearer token from `Authorization`, falling back to the login cookie.
fn extract_token(req: &Request) -> Option<String> {
    if let Some(value) = req.headers().get(header::AUTHORIZATION) {
        let value = value.to_str().ok()?;
        let token = value.strip_prefix("Bearer ")?.trim();
        return (!token.is_empty()).then(|| token.to_string());
    }
    CookieJar::from_headers(req.headers())
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
}

/// Verify the caller's token and attach the [`Actor`] to the request.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let Some(token) = extract_token(&req) else {
        warn!(path = %req.uri().path(), "missing bearer token");
        return Err(JsonApiError::unauthorized("missing bearer token"));
    };
    let claims = state.auth.verify_token(&token).map_err(|e| {
        warn!(path = %req.uri().path(), err = %e, "rejected bearer token");
        JsonApiError::unauthorized("invalid or expired token")
    })?;
    req.extensions_mut().insert(claims.actor());
    Ok(next.run(req).await)
}
