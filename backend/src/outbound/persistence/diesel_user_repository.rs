//! Diesel-backed [`UserRepository`] adapter.

use async_trait::async_trait;
use diesel::prelude::*;

use super::diesel_helpers::{is_unique_violation, run_blocking};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{PasswordHash, User, UserId, Username};

/// SQLite persistence for user accounts.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn checkout(pool: &DbPool) -> Result<super::pool::DbConnection, UserPersistenceError> {
    pool.get()
        .map_err(|err| UserPersistenceError::connection(err.to_string()))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(
        &self,
        username: &Username,
        password: &PasswordHash,
    ) -> Result<User, UserPersistenceError> {
        let pool = self.pool.clone();
        let username = username.clone();
        let password = password.as_encoded().to_owned();
        run_blocking(UserPersistenceError::connection, move || {
            let mut conn = checkout(&pool)?;
            let id = UserId::random();
            let row = NewUserRow {
                id: id.as_ref(),
                username: username.as_ref(),
                password_hash: &password,
            };
            diesel::insert_into(users::table)
                .values(&row)
                .execute(&mut conn)
                .map_err(|err| {
                    if is_unique_violation(&err) {
                        UserPersistenceError::duplicate_username(username.as_ref())
                    } else {
                        UserPersistenceError::query(err.to_string())
                    }
                })?;
            Ok(User::new(id, username))
        })
        .await
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(User, PasswordHash)>, UserPersistenceError> {
        let pool = self.pool.clone();
        let username = username.to_owned();
        run_blocking(UserPersistenceError::connection, move || {
            let mut conn = checkout(&pool)?;
            let row = users::table
                .filter(users::username.eq(&username))
                .select(UserRow::as_select())
                .first::<UserRow>(&mut conn)
                .optional()
                .map_err(|err| UserPersistenceError::query(err.to_string()))?;
            row.map(UserRow::into_domain).transpose()
        })
        .await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let pool = self.pool.clone();
        let id = id.clone();
        run_blocking(UserPersistenceError::connection, move || {
            let mut conn = checkout(&pool)?;
            let row = users::table
                .find(id.as_ref())
                .select(UserRow::as_select())
                .first::<UserRow>(&mut conn)
                .optional()
                .map_err(|err| UserPersistenceError::query(err.to_string()))?;
            Ok(row
                .map(UserRow::into_domain)
                .transpose()?
                .map(|(user, _)| user))
        })
        .await
    }
}
