//! Login - exchanges credentials for a bearer token.

use actix_web::{Either, HttpResponse, web};

use postboard_core::ports::{AuthError, PasswordService, TokenService, UserRepository};
use postboard_shared::dto::{LoginRequest, TokenResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn invalid_credentials() -> AppError {
    AuthError::InvalidCredentials.into()
}

/// POST /login
///
/// Accepts an OAuth2 password form (`username`, `password`) or the same
/// fields as JSON. Unknown email and wrong password are indistinguishable.
pub async fn login(
    state: web::Data<AppState>,
    body: Either<web::Form<LoginRequest>, web::Json<LoginRequest>>,
) -> AppResult<HttpResponse> {
    let req = match body {
        Either::Left(form) => form.into_inner(),
        Either::Right(json) => json.into_inner(),
    };

    let user = state
        .users
        .find_by_email(&req.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let passwords = state.passwords.clone();
    let stored_hash = user.password_hash;
    let password = req.password;
    let verified = web::block(move || passwords.verify(&password, &stored_hash)).await?;

    match verified {
        Ok(true) => {}
        Ok(false) => return Err(invalid_credentials()),
        Err(e) => {
            tracing::warn!(user_id = user.id, "Stored password hash is unreadable: {}", e);
            return Err(invalid_credentials());
        }
    }

    let token = state
        .tokens
        .generate_token(user.id)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
    }))
}
