//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use registry_core::entities::{NewUser, User, UserChanges};
use registry_core::traits::{RepoResult, UserFilter, UserQuery, UserRepository};

use crate::mappers::{UserInsert, UserUpdate};
use crate::models::UserModel;

use super::error::{contains_pattern, map_db_error, user_not_found};

const USER_COLUMNS: &str =
    "id, full_name, phone_number, tg_user, address, created_at, updated_at";

/// `$1` is the address (or NULL), `$2` the ILIKE pattern (or NULL)
const FILTER_CLAUSE: &str = r"
    ($1::TEXT IS NULL OR address = $1)
    AND ($2::TEXT IS NULL
         OR full_name ILIKE $2
         OR phone_number ILIKE $2
         OR tg_user ILIKE $2)
";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_users(rows: Vec<UserModel>) -> RepoResult<Vec<User>> {
    rows.into_iter().map(User::try_from).collect()
}

fn filter_binds(filter: &UserFilter) -> (Option<&'static str>, Option<String>) {
    (
        filter.address.map(|a| a.as_str()),
        filter.search_term().map(contains_pattern),
    )
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &UserQuery) -> RepoResult<Vec<User>> {
        let (address, pattern) = filter_binds(&query.filter);
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {FILTER_CLAUSE} \
             ORDER BY created_at DESC, id DESC LIMIT $3 OFFSET $4"
        );

        let rows = sqlx::query_as::<_, UserModel>(&sql)
            .bind(address)
            .bind(pattern)
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_users(rows)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &UserFilter) -> RepoResult<i64> {
        let (address, pattern) = filter_binds(filter);
        let sql = format!("SELECT COUNT(*) FROM users WHERE {FILTER_CLAUSE}");

        sqlx::query_scalar::<_, i64>(&sql)
            .bind(address)
            .bind(pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM users WHERE created_at >= $1
            ",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn latest(&self, limit: i64) -> RepoResult<Vec<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        let rows = sqlx::query_as::<_, UserModel>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_users(rows)
    }

    #[instrument(skip(self))]
    async fn search_by_phone(&self, fragment: &str) -> RepoResult<Vec<User>> {
        // Plain LIKE: phone numbers have no case
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE phone_number LIKE $1 \
             ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, UserModel>(&sql)
            .bind(contains_pattern(fragment))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_users(rows)
    }

    #[instrument(skip(self, user), fields(tg_user = %user.tg_user))]
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let insert = UserInsert::new(user);
        let sql = format!(
            "INSERT INTO users (full_name, phone_number, tg_user, address, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) RETURNING {USER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UserModel>(&sql)
            .bind(insert.full_name)
            .bind(insert.phone_number)
            .bind(insert.tg_user)
            .bind(insert.address)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        User::try_from(row)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: i64, changes: &UserChanges) -> RepoResult<User> {
        let update = UserUpdate::new(changes);
        let sql = format!(
            "UPDATE users \
             SET full_name = COALESCE($2, full_name), \
                 phone_number = COALESCE($3, phone_number), \
                 tg_user = COALESCE($4, tg_user), \
                 address = COALESCE($5, address), \
                 updated_at = GREATEST($6, created_at) \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UserModel>(&sql)
            .bind(id)
            .bind(update.full_name)
            .bind(update.phone_number)
            .bind(update.tg_user)
            .bind(update.address)
            .bind(changes.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| user_not_found(id))?;

        User::try_from(row)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM users WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
