//! Post repository contract and SQLite implementation.

use super::{count_to_u64, ensure_connection_ready, RepoError, RepoResult, POST_LAYOUT};
use crate::model::post::{NewPost, Post, PostId};
use crate::model::user::UserId;
use log::debug;
use rusqlite::{Connection, Row};

/// Repository interface for post records.
pub trait PostRepository {
    fn create_post(&self, post: &NewPost) -> RepoResult<PostId>;
    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    fn delete_post(&self, id: PostId) -> RepoResult<()>;
    /// Posts owned by `user_id`, oldest first.
    fn list_posts_by_user(&self, user_id: UserId) -> RepoResult<Vec<Post>>;
    fn count_posts_by_user(&self, user_id: UserId) -> RepoResult<u64>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[POST_LAYOUT])?;
        Ok(Self { conn })
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create_post(&self, post: &NewPost) -> RepoResult<PostId> {
        self.conn
            .execute("INSERT INTO post (user_id) VALUES (?1);", [post.user_id])?;

        let id = self.conn.last_insert_rowid();
        debug!(
            "event=post_create module=repo status=ok post_id={id} user_id={}",
            post.user_id
        );
        Ok(id)
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, user_id FROM post WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_post_row(row)?));
        }
        Ok(None)
    }

    fn delete_post(&self, id: PostId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM post WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "post", id });
        }

        debug!("event=post_delete module=repo status=ok post_id={id}");
        Ok(())
    }

    fn list_posts_by_user(&self, user_id: UserId) -> RepoResult<Vec<Post>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, user_id FROM post WHERE user_id = ?1 ORDER BY id ASC;")?;
        let mut rows = stmt.query([user_id])?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }
        Ok(posts)
    }

    fn count_posts_by_user(&self, user_id: UserId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM post WHERE user_id = ?1;",
            [user_id],
            |row| row.get(0),
        )?;
        count_to_u64(count, "post.user_id")
    }
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    Ok(Post {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
    })
}
