use contracts::system::auth::{LoginRequest, LoginResponse};
use contracts::ApiError;

use crate::shared::http;

pub const LOGIN_PATH: &str = "/auth/login";

/// Login with email and password
pub async fn login(email: String, password: String) -> Result<LoginResponse, ApiError> {
    let email = email.trim().to_string();
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }
    let request = LoginRequest { email, password };
    http::post_json_anonymous(LOGIN_PATH, &request).await
}
