//! Authentication route handlers for admin.
//!
//! Username and password login backed by Argon2 hashes. The login POST is
//! rate limited per client IP.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{
    OptionalAdminAuth, auth_rate_limiter, clear_current_admin, set_current_admin,
};
use crate::models::CurrentAdmin;
use crate::routes::flash::Flash;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Shown for both unknown usernames and wrong passwords.
const LOGIN_FAILED: &str = "Usuário ou senha incorretos.";

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginPageTemplate {
    username: String,
    error_message: Option<&'static str>,
}

impl LoginPageTemplate {
    fn render_html(&self) -> Html<String> {
        Html(self.render().unwrap_or_else(|e| format!("Template error: {e}")))
    }
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/auth/login",
            get(login_page).merge(post(login).layer(auth_rate_limiter())),
        )
        .route("/auth/logout", post(logout))
}

/// Render the login page.
///
/// GET /auth/login
async fn login_page(OptionalAdminAuth(admin): OptionalAdminAuth) -> Response {
    if admin.is_some() {
        return Redirect::to("/").into_response();
    }

    LoginPageTemplate {
        username: String::new(),
        error_message: None,
    }
    .render_html()
    .into_response()
}

/// Check credentials and start a session.
///
/// POST /auth/login
#[instrument(skip(state, session, form), fields(username = %form.username.trim()))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let username = form.username.trim();
    let password = form.password.trim();

    let user = match AuthService::new(state.pool()).login(username, password).await {
        Ok(user) => user,
        Err(AuthError::UserNotFound) => {
            info!("Login failed: unknown username");
            return Ok(login_failed(username));
        }
        Err(AuthError::InvalidPassword) => {
            info!("Login failed: wrong password");
            return Ok(login_failed(username));
        }
        Err(e) => return Err(e.into()),
    };

    let admin = CurrentAdmin::from(&user);
    set_current_admin(&session, &admin).await.map_err(|e| {
        warn!(error = %e, "Failed to store admin session");
        AppError::Internal(format!("session error: {e}"))
    })?;
    set_sentry_user(admin.id.get(), admin.username.as_str());

    info!(admin_id = admin.id.get(), "Admin logged in");
    Ok(Flash::Welcome.redirect().into_response())
}

fn login_failed(username: &str) -> Response {
    let page = LoginPageTemplate {
        username: username.to_owned(),
        error_message: Some(LOGIN_FAILED),
    };
    (StatusCode::UNAUTHORIZED, page.render_html()).into_response()
}

/// Logout and clear session.
///
/// POST /auth/logout
async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = clear_current_admin(&session).await {
        warn!(error = %e, "Failed to clear admin session");
    }
    clear_sentry_user();

    Redirect::to("/auth/login")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_page_renders_error_and_username() {
        let html = LoginPageTemplate {
            username: "maria".to_string(),
            error_message: Some(LOGIN_FAILED),
        }
        .render()
        .unwrap();

        assert!(html.contains("value=\"maria\""));
        assert!(html.contains(LOGIN_FAILED));
        assert!(html.contains("action=\"/auth/login\""));
    }

    #[test]
    fn test_login_failed_is_unauthorized() {
        assert_eq!(login_failed("x").status(), StatusCode::UNAUTHORIZED);
    }
}
