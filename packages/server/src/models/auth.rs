use crate::error::AppError;
use serde::{Deserialize, Serialize};

const PASSWORD_SPECIALS: &str = "@#$%^&+=!";

/// Request body for user registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Unique username (1-32 chars, alphanumeric and underscores).
    #[schema(example = "alice_hikes")]
    pub username: String,
    /// Unique email address.
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Password: at least 8 characters with a digit, a lower- and upper-case letter
    /// and one of `@#$%^&+=!`, no whitespace.
    #[schema(example = "Tr41l#Head")]
    pub password: String,
}

pub fn validate_register_request(payload: &RegisterRequest) -> Result<(), AppError> {
    let username = payload.username.trim();
    if username.is_empty() || username.chars().count() > 32 {
        return Err(AppError::Validation(
            "Username must be 1-32 characters".into(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(AppError::Validation(
            "Username must contain only letters, digits, and underscores".into(),
        ));
    }

    validate_email(payload.email.trim())?;
    validate_password(&payload.password)
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let invalid = || AppError::Validation("Email must be a valid address".into());
    if email.chars().count() > 255 || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && tld.len() >= 2 => Ok(()),
        _ => Err(invalid()),
    }
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }
    if password.chars().any(char::is_whitespace) {
        return Err(AppError::Validation(
            "Password must not contain whitespace".into(),
        ));
    }
    let strong = password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c));
    if !strong {
        return Err(AppError::Validation(format!(
            "Password must contain a digit, a lowercase letter, an uppercase letter and one of {PASSWORD_SPECIALS}"
        )));
    }
    Ok(())
}

/// Request body for user login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Username of the account to log into.
    #[schema(example = "alice_hikes")]
    pub username: String,
    /// Account password.
    #[schema(example = "Tr41l#Head")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful registration response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    /// ID of the newly created user.
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "alice_hikes")]
    pub username: String,
    /// Bearer token, so a fresh account can act immediately.
    pub token: String,
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = 42)]
    pub user_id: i32,
    #[schema(example = "alice_hikes")]
    pub username: String,
}

/// Current authenticated user's identity.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "alice_hikes")]
    pub username: String,
}
