//! # Tokengate DB
//!
//! PostgreSQL wiring for tokengate: pool initialization, the bundled
//! migrations and [`PgUserStore`], the production [`UserStore`].
//!
//! # Example
//!
//! ```ignore
//! use tokengate_db::{PgUserStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&std::env::var("DATABASE_URL")?).await?;
//! run_migrations(&pool).await?;
//! let store = PgUserStore::new(pool);
//! ```

use std::time::Duration;

use sqlx::FromRow;
use sqlx::postgres::PgPoolOptions;
use tokengate_auth::{StoreError, User, UserId, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connects a PostgreSQL pool.
///
/// Call once at startup; the returned pool is cheaply cloneable. Acquiring a
/// connection times out after five seconds, which bounds every store lookup.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    full_name: Option<String>,
    hashed_password: String,
    is_active: bool,
    is_superuser: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            password_hash: row.hashed_password,
            is_active: row.is_active,
            is_superuser: row.is_superuser,
        }
    }
}

const SELECT_USER: &str =
    "SELECT id, email, full_name, hashed_password, is_active, is_superuser FROM users";

/// [`UserStore`] backed by the `users` table. Read-only.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_error(e: sqlx::Error) -> StoreError {
    tracing::error!(error = %e, "User lookup failed");
    StoreError::Unavailable(e.to_string())
}

impl UserStore for PgUserStore {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(User::from))
            .map_err(store_error)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(User::from))
            .map_err(store_error)
    }
}

/// Fields for [`create_user`]. `password_hash` must already be a bcrypt hash.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub full_name: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

/// Inserts a user and returns its id, or `None` when the email is taken.
/// Used by the admin CLI; the token service never writes.
pub async fn create_user(pool: &PgPool, user: &NewUser) -> Result<Option<UserId>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (email, full_name, hashed_password, is_active, is_superuser)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(&user.email)
    .bind(&user.full_name)
    .bind(&user.password_hash)
    .bind(user.is_active)
    .bind(user.is_superuser)
    .fetch_optional(pool)
    .await
}

/// Sets the active flag. Returns `false` when no user has this email.
pub async fn set_user_active(pool: &PgPool, email: &str, active: bool) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET is_active = $1 WHERE email = $2")
        .bind(active)
        .bind(email)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
