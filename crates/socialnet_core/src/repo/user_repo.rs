//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and lookup APIs over the `user` table.
//!
//! # Invariants
//! - `update_user` never writes `created_at`.
//! - Email and user name uniqueness is enforced by storage and surfaces as
//!   `RepoError::ConstraintViolation`.
//! - Log events carry ids only, never emails or credentials.
//! - Field validation applies to writes only; stored rows are read as-is.

use super::{ensure_connection_ready, push_pagination, RepoError, RepoResult, USER_LAYOUT};
use crate::model::user::{NewUser, User, UserId};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Params, Row};

const USER_SELECT_SQL: &str = "SELECT
    id,
    email,
    password,
    user_name,
    first_name,
    last_name,
    created_at
FROM \"user\"";

/// Pagination options for listing users. Results are ordered by `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for user records.
pub trait UserRepository {
    fn create_user(&self, user: &NewUser) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    fn get_user_by_name(&self, user_name: &str) -> RepoResult<Option<User>>;
    /// Rewrites every mutable column of an existing user.
    fn update_user(&self, user: &User) -> RepoResult<()>;
    fn delete_user(&self, id: UserId) -> RepoResult<()>;
    fn list_users(&self, query: &UserListQuery) -> RepoResult<Vec<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[USER_LAYOUT])?;
        Ok(Self { conn })
    }

    fn query_one<P: Params>(&self, filter: &str, params: P) -> RepoResult<Option<User>> {
        let mut stmt = self.conn.prepare(&format!("{USER_SELECT_SQL} {filter};"))?;
        let mut rows = stmt.query(params)?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &NewUser) -> RepoResult<UserId> {
        user.validate()?;

        self.conn.execute(
            "INSERT INTO \"user\" (
                email,
                password,
                user_name,
                first_name,
                last_name
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                user.email.as_str(),
                user.password.as_str(),
                user.user_name.as_deref(),
                user.first_name.as_deref(),
                user.last_name.as_deref(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("event=user_create module=repo status=ok user_id={id}");
        Ok(id)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.query_one("WHERE id = ?1", [id])
    }

    fn get_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.query_one("WHERE email = ?1", [email])
    }

    fn get_user_by_name(&self, user_name: &str) -> RepoResult<Option<User>> {
        self.query_one("WHERE user_name = ?1", [user_name])
    }

    fn update_user(&self, user: &User) -> RepoResult<()> {
        user.validate()?;

        let changed = self.conn.execute(
            "UPDATE \"user\"
             SET
                email = ?1,
                password = ?2,
                user_name = ?3,
                first_name = ?4,
                last_name = ?5
             WHERE id = ?6;",
            params![
                user.email.as_str(),
                user.password.as_str(),
                user.user_name.as_deref(),
                user.first_name.as_deref(),
                user.last_name.as_deref(),
                user.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "user",
                id: user.id,
            });
        }

        debug!("event=user_update module=repo status=ok user_id={}", user.id);
        Ok(())
    }

    fn delete_user(&self, id: UserId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM \"user\" WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "user", id });
        }

        debug!("event=user_delete module=repo status=ok user_id={id}");
        Ok(())
    }

    fn list_users(&self, query: &UserListQuery) -> RepoResult<Vec<User>> {
        let mut sql = format!("{USER_SELECT_SQL} ORDER BY id ASC");
        let mut bind_values: Vec<Value> = Vec::new();
        push_pagination(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    Ok(User {
        id: row.get("id")?,
        email: row.get("email")?,
        password: row.get("password")?,
        user_name: row.get("user_name")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        created_at: row.get("created_at")?,
    })
}
