use crate::modules::users::model::{CreateUserDto, UpdateUserDto, User, UserFilterParams};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedBody;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use scaffold_core::{AppError, Envelope};
use tracing::instrument;

/// List users, optionally filtered by `search`, one page at a time
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    Query(params): Query<UserFilterParams>,
) -> Result<Envelope<Vec<User>>, AppError> {
    let (users, pagination) = UserService::get_users(state.users.as_ref(), &params).await?;
    Ok(Envelope::success(StatusCode::OK)
        .with_data(users)
        .with_pagination(pagination))
}

/// Get a single user by id
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Envelope<User>, AppError> {
    let user = UserService::get_user(state.users.as_ref(), &id).await?;
    Ok(Envelope::success(StatusCode::OK).with_data(user))
}

/// Create a new user
#[instrument(skip(state))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedBody(dto): ValidatedBody<CreateUserDto>,
) -> Result<Envelope<User>, AppError> {
    let user = UserService::create_user(state.users.as_ref(), dto).await?;
    Ok(Envelope::success(StatusCode::CREATED)
        .with_message("User created successfully")
        .with_data(user))
}

/// Partially update a user
#[instrument(skip(state))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedBody(dto): ValidatedBody<UpdateUserDto>,
) -> Result<Envelope<User>, AppError> {
    let user = UserService::update_user(state.users.as_ref(), &id, dto).await?;
    Ok(Envelope::success(StatusCode::OK)
        .with_message("User updated successfully")
        .with_data(user))
}

/// Delete a user
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Envelope, AppError> {
    UserService::delete_user(state.users.as_ref(), &id).await?;
    Ok(Envelope::success(StatusCode::OK).with_message("User deleted successfully"))
}
