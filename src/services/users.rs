//! Identity service: registration, authentication and user administration

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        response::Pagination,
        user::{CurrentUser, PublicUser, Role, SigninRequest, SignupRequest},
    },
    repository::Repository,
    services::tokens::TokenService,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    tokens: TokenService,
}

impl UsersService {
    pub fn new(repository: Repository, tokens: TokenService) -> Self {
        Self { repository, tokens }
    }

    /// Register a new account.
    ///
    /// The stored role follows the caller, not the request: a superadmin may
    /// assign any role, every other caller (subadmins and anonymous signups
    /// included) creates a plain user.
    pub async fn signup(
        &self,
        request: SignupRequest,
        caller: Option<&CurrentUser>,
    ) -> AppResult<()> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.users.email_exists(&request.email).await? {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(&request.password)?;
        let role = resolve_role(request.role, caller);

        self.repository
            .users
            .create(&request.email, &password_hash, role)
            .await?;

        tracing::info!(email = %request.email, role = %role, "user registered");
        Ok(())
    }

    /// Authenticate by email and password and issue a session token.
    ///
    /// Unknown email and wrong password produce the same error so the
    /// response does not reveal which accounts exist.
    pub async fn signin(&self, request: SigninRequest) -> AppResult<String> {
        let user = self
            .repository
            .users
            .get_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !verify_password(&user.password_hash, &request.password)? {
            return Err(AppError::Authentication("Invalid email or password".to_string()));
        }

        self.tokens.issue(user.id, user.role, &user.email)
    }

    /// The caller's own profile
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<PublicUser> {
        let user = self
            .repository
            .users
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    /// Single user by id
    pub async fn get_user(&self, id: Uuid) -> AppResult<PublicUser> {
        let user = self
            .repository
            .users
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    /// Page of users, newest first
    pub async fn list_users(&self, page: i64, limit: i64) -> AppResult<(Vec<PublicUser>, i64)> {
        let limit = limit.max(1);
        let offset = Pagination::offset(page, limit);
        let (users, total) = self.repository.users.list(limit, offset).await?;

        Ok((users.into_iter().map(PublicUser::from).collect(), total))
    }

    /// Remove a user; books they created stay behind with a dangling owner
    pub async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        if !self.repository.users.delete(id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }
}

/// Role assignment policy: superadmins choose freely, everyone else gets `user`
fn resolve_role(requested: Option<Role>, caller: Option<&CurrentUser>) -> Role {
    match caller {
        Some(caller) if caller.role == Role::Superadmin => requested.unwrap_or(Role::User),
        _ => Role::User,
    }
}

/// Hash a password using Argon2
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash
fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
