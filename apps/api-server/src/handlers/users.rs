//! User registration and lookup.

use actix_web::{HttpResponse, web};
use validator::Validate;

use postboard_core::domain::{NewUser, User};
use postboard_core::ports::{BaseRepository, PasswordService, UserRepository};
use postboard_shared::dto::{CreateUserRequest, UserResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email,
        created_at: user.created_at,
    }
}

/// POST /users
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let passwords = state.passwords.clone();
    let password = req.password;
    let password_hash = web::block(move || passwords.hash(&password)).await??;

    // A concurrent registration can still win the race; the unique index
    // turns that into a Constraint error, i.e. 409.
    let user = state
        .users
        .create(NewUser::new(req.email, password_hash))
        .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok(HttpResponse::Created().json(user_response(user)))
}

/// GET /users/{id}
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("The user with id:{} not found", id)))?;

    Ok(HttpResponse::Ok().json(user_response(user)))
}
