//! SQLite implementation of the relation accessor used by projections.
//!
//! Every call issues one query against the borrowed connection; related
//! records are resolved only when a projection asks for them.

use super::comment_repo::{CommentRepository, SqliteCommentRepository};
use super::post_repo::{PostRepository, SqlitePostRepository};
use super::user_repo::{SqliteUserRepository, UserRepository};
use super::RepoResult;
use crate::model::post::{Post, PostId};
use crate::model::user::{User, UserId};
use crate::projection::RecordLookup;
use rusqlite::Connection;

/// Lazy relation resolver over a migrated connection.
pub struct SqliteRecordLookup<'conn> {
    users: SqliteUserRepository<'conn>,
    posts: SqlitePostRepository<'conn>,
    comments: SqliteCommentRepository<'conn>,
}

impl<'conn> SqliteRecordLookup<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self {
            users: SqliteUserRepository::try_new(conn)?,
            posts: SqlitePostRepository::try_new(conn)?,
            comments: SqliteCommentRepository::try_new(conn)?,
        })
    }
}

impl RecordLookup for SqliteRecordLookup<'_> {
    fn find_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.users.get_user(id)
    }

    fn find_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.posts.get_post(id)
    }

    fn count_posts_by_user(&self, id: UserId) -> RepoResult<u64> {
        self.posts.count_posts_by_user(id)
    }

    fn count_comments_by_user(&self, id: UserId) -> RepoResult<u64> {
        self.comments.count_comments_by_author(id)
    }
}
