//! Account lifecycle domain services.
//!
//! Signup hashes the password before it reaches the repository; login
//! failures are reported with one message whether the username or the
//! password was wrong.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::auth::{LoginCredentials, SignupDetails};
use crate::domain::ports::{AccountCommands, UserPersistenceError, UserRepository};
use crate::domain::user::PasswordHash;
use crate::domain::{Error, User};

const BAD_CREDENTIALS: &str = "invalid username or password";

/// Account service implementing [`AccountCommands`].
#[derive(Clone)]
pub struct AccountService<U> {
    user_repo: Arc<U>,
}

impl<U> AccountService<U> {
    /// Create a new service over the given repository.
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }
}

impl<U> AccountService<U>
where
    U: UserRepository,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateUsername { username } => Error::field_validation(
                "username",
                format!("username {username} is already taken"),
            ),
        }
    }
}

#[async_trait]
impl<U> AccountCommands for AccountService<U>
where
    U: UserRepository,
{
    async fn signup(&self, details: SignupDetails) -> Result<User, Error> {
        let digest = PasswordHash::hash(details.password());
        let user = self
            .user_repo
            .create(details.username(), &digest)
            .await
            .map_err(Self::map_user_error)?;
        info!(user_id = %user.id(), "account created");
        Ok(user)
    }

    async fn authenticate(&self, credentials: LoginCredentials) -> Result<User, Error> {
        let Some((user, digest)) = self
            .user_repo
            .find_by_username(credentials.username())
            .await
            .map_err(Self::map_user_error)?
        else {
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        };

        if !digest.verify(credentials.password()) {
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        }

        Ok(user)
    }
}
