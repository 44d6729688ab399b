//! Comment repository contract and SQLite implementation.
//!
//! # Invariants
//! - `comment_text` may be NULL; an absent text is stored as-is.
//! - Author and post references are checked by storage foreign keys.

use super::{count_to_u64, ensure_connection_ready, RepoError, RepoResult, COMMENT_LAYOUT};
use crate::model::comment::{Comment, CommentId, NewComment};
use crate::model::post::PostId;
use crate::model::user::UserId;
use log::debug;
use rusqlite::{params, Connection, Params, Row};

const COMMENT_SELECT_SQL: &str = "SELECT
    id,
    comment_text,
    author_id,
    post_id
FROM comment";

/// Repository interface for comment records.
pub trait CommentRepository {
    fn create_comment(&self, comment: &NewComment) -> RepoResult<CommentId>;
    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>>;
    fn update_comment_text(&self, id: CommentId, comment_text: Option<&str>) -> RepoResult<()>;
    fn delete_comment(&self, id: CommentId) -> RepoResult<()>;
    /// Comments on `post_id`, oldest first.
    fn list_comments_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>>;
    /// Comments written by `author_id`, oldest first.
    fn list_comments_by_author(&self, author_id: UserId) -> RepoResult<Vec<Comment>>;
    fn count_comments_by_author(&self, author_id: UserId) -> RepoResult<u64>;
}

/// SQLite-backed comment repository.
pub struct SqliteCommentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCommentRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[COMMENT_LAYOUT])?;
        Ok(Self { conn })
    }

    fn query_many<P: Params>(&self, filter: &str, params: P) -> RepoResult<Vec<Comment>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMMENT_SELECT_SQL} {filter} ORDER BY id ASC;"))?;
        let mut rows = stmt.query(params)?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            comments.push(parse_comment_row(row)?);
        }
        Ok(comments)
    }
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn create_comment(&self, comment: &NewComment) -> RepoResult<CommentId> {
        self.conn.execute(
            "INSERT INTO comment (comment_text, author_id, post_id) VALUES (?1, ?2, ?3);",
            params![
                comment.comment_text.as_deref(),
                comment.author_id,
                comment.post_id
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(
            "event=comment_create module=repo status=ok comment_id={id} post_id={} author_id={}",
            comment.post_id, comment.author_id
        );
        Ok(id)
    }

    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        Ok(self.query_many("WHERE id = ?1", [id])?.into_iter().next())
    }

    fn update_comment_text(&self, id: CommentId, comment_text: Option<&str>) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE comment SET comment_text = ?1 WHERE id = ?2;",
            params![comment_text, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "comment",
                id,
            });
        }

        debug!("event=comment_update module=repo status=ok comment_id={id}");
        Ok(())
    }

    fn delete_comment(&self, id: CommentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM comment WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "comment",
                id,
            });
        }

        debug!("event=comment_delete module=repo status=ok comment_id={id}");
        Ok(())
    }

    fn list_comments_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>> {
        self.query_many("WHERE post_id = ?1", [post_id])
    }

    fn list_comments_by_author(&self, author_id: UserId) -> RepoResult<Vec<Comment>> {
        self.query_many("WHERE author_id = ?1", [author_id])
    }

    fn count_comments_by_author(&self, author_id: UserId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM comment WHERE author_id = ?1;",
            [author_id],
            |row| row.get(0),
        )?;
        count_to_u64(count, "comment.author_id")
    }
}

fn parse_comment_row(row: &Row<'_>) -> RepoResult<Comment> {
    Ok(Comment {
        id: row.get("id")?,
        comment_text: row.get("comment_text")?,
        author_id: row.get("author_id")?,
        post_id: row.get("post_id")?,
    })
}
