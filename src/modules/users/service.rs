use anyhow::anyhow;
use scaffold_core::{AppError, IntegerInput, Pagination};

use super::model::{
    AGE_RULE_MESSAGE, CreateUserDto, NewUser, UpdateUserDto, User, UserChanges, UserFilterParams,
};
use super::repository::{RepositoryError, UserRepository};

pub const USER_NOT_FOUND: &str = "User not found";
pub const EMAIL_IN_USE: &str = "Email is already in use";

fn repository_error(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::NotFound(_) => AppError::not_found(anyhow!(USER_NOT_FOUND)),
        RepositoryError::DuplicateEmail(_) => AppError::conflict(anyhow!(EMAIL_IN_USE)),
    }
}

/// Path ids that are not integers name no user at all.
fn parse_id(raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| AppError::not_found(anyhow!(USER_NOT_FOUND)))
}

fn parse_age(age: Option<IntegerInput>) -> Result<Option<u32>, AppError> {
    age.map(|age| {
        age.as_i64()
            .and_then(|value| u32::try_from(value).ok())
            .ok_or_else(|| AppError::bad_request(anyhow!(AGE_RULE_MESSAGE)))
    })
    .transpose()
}

pub struct UserService;

impl UserService {
    pub async fn get_users(
        repo: &dyn UserRepository,
        params: &UserFilterParams,
    ) -> Result<(Vec<User>, Pagination), AppError> {
        let users = repo.list(params.search()).await.map_err(repository_error)?;
        Ok(params.pagination.paginate(users))
    }

    pub async fn get_user(repo: &dyn UserRepository, id: &str) -> Result<User, AppError> {
        let id = parse_id(id)?;
        repo.get(id)
            .await
            .map_err(repository_error)?
            .ok_or_else(|| AppError::not_found(anyhow!(USER_NOT_FOUND)))
    }

    pub async fn create_user(
        repo: &dyn UserRepository,
        dto: CreateUserDto,
    ) -> Result<User, AppError> {
        let user = NewUser {
            name: dto.name,
            email: dto.email,
            age: parse_age(dto.age)?,
        };

        let user = repo.create(user).await.map_err(repository_error)?;
        tracing::info!(user.id = user.id, "User created");
        Ok(user)
    }

    pub async fn update_user(
        repo: &dyn UserRepository,
        id: &str,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let id = parse_id(id)?;
        let changes = UserChanges {
            name: dto.name,
            email: dto.email,
            age: parse_age(dto.age)?,
        };

        let user = repo.update(id, changes).await.map_err(repository_error)?;
        tracing::info!(user.id = user.id, "User updated");
        Ok(user)
    }

    pub async fn delete_user(repo: &dyn UserRepository, id: &str) -> Result<User, AppError> {
        let id = parse_id(id)?;
        let user = repo.delete(id).await.map_err(repository_error)?;
        tracing::info!(user.id = user.id, "User deleted");
        Ok(user)
    }
}
