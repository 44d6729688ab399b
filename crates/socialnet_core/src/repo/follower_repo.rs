//! Follower-edge repository contract and SQLite implementation.
//!
//! # Invariants
//! - An edge reads "`follower_id` follows `followed_id`".
//! - Duplicate edges are not rejected; `unfollow` removes every matching edge.

use super::{ensure_connection_ready, RepoError, RepoResult, FOLLOWERS_LAYOUT};
use crate::model::follower::{Follower, FollowerId, NewFollower};
use crate::model::user::UserId;
use log::debug;
use rusqlite::{params, Connection, Params, Row};

const FOLLOWER_SELECT_SQL: &str = "SELECT
    id,
    follower_id,
    followed_id
FROM followers";

/// Repository interface for follow edges.
pub trait FollowerRepository {
    fn follow(&self, edge: &NewFollower) -> RepoResult<FollowerId>;
    fn get_follower(&self, id: FollowerId) -> RepoResult<Option<Follower>>;
    /// Removes `follower_id -> followed_id`. Returns whether any edge existed.
    fn unfollow(&self, follower_id: UserId, followed_id: UserId) -> RepoResult<bool>;
    fn delete_follower(&self, id: FollowerId) -> RepoResult<()>;
    /// Edges where `user_id` is the follower.
    fn list_following(&self, user_id: UserId) -> RepoResult<Vec<Follower>>;
    /// Edges where `user_id` is the one being followed.
    fn list_followers(&self, user_id: UserId) -> RepoResult<Vec<Follower>>;
    fn is_following(&self, follower_id: UserId, followed_id: UserId) -> RepoResult<bool>;
}

/// SQLite-backed follower repository.
pub struct SqliteFollowerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFollowerRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[FOLLOWERS_LAYOUT])?;
        Ok(Self { conn })
    }

    fn query_many<P: Params>(&self, filter: &str, params: P) -> RepoResult<Vec<Follower>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FOLLOWER_SELECT_SQL} {filter} ORDER BY id ASC;"))?;
        let mut rows = stmt.query(params)?;
        let mut edges = Vec::new();
        while let Some(row) = rows.next()? {
            edges.push(parse_follower_row(row)?);
        }
        Ok(edges)
    }
}

impl FollowerRepository for SqliteFollowerRepository<'_> {
    fn follow(&self, edge: &NewFollower) -> RepoResult<FollowerId> {
        self.conn.execute(
            "INSERT INTO followers (follower_id, followed_id) VALUES (?1, ?2);",
            params![edge.follower_id, edge.followed_id],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(
            "event=follow module=repo status=ok edge_id={id} follower_id={} followed_id={}",
            edge.follower_id, edge.followed_id
        );
        Ok(id)
    }

    fn get_follower(&self, id: FollowerId) -> RepoResult<Option<Follower>> {
        Ok(self.query_many("WHERE id = ?1", [id])?.into_iter().next())
    }

    fn unfollow(&self, follower_id: UserId, followed_id: UserId) -> RepoResult<bool> {
        let removed = self.conn.execute(
            "DELETE FROM followers WHERE follower_id = ?1 AND followed_id = ?2;",
            params![follower_id, followed_id],
        )?;

        debug!(
            "event=unfollow module=repo status=ok follower_id={follower_id} followed_id={followed_id} removed={removed}"
        );
        Ok(removed > 0)
    }

    fn delete_follower(&self, id: FollowerId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM followers WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "followers",
                id,
            });
        }

        debug!("event=follower_delete module=repo status=ok edge_id={id}");
        Ok(())
    }

    fn list_following(&self, user_id: UserId) -> RepoResult<Vec<Follower>> {
        self.query_many("WHERE follower_id = ?1", [user_id])
    }

    fn list_followers(&self, user_id: UserId) -> RepoResult<Vec<Follower>> {
        self.query_many("WHERE followed_id = ?1", [user_id])
    }

    fn is_following(&self, follower_id: UserId, followed_id: UserId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM followers
                WHERE follower_id = ?1 AND followed_id = ?2
            );",
            params![follower_id, followed_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_follower_row(row: &Row<'_>) -> RepoResult<Follower> {
    Ok(Follower {
        id: row.get("id")?,
        follower_id: row.get("follower_id")?,
        followed_id: row.get("followed_id")?,
    })
}
