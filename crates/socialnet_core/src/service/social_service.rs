//! Social graph use-case service.
//!
//! # Responsibility
//! - Provide create/read entry points that return projected views.
//! - Check referenced records up front so callers get `NotFound` instead of
//!   a raw foreign-key failure.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Every returned view is produced by the record's `serialize`.

use crate::model::comment::NewComment;
use crate::model::follower::NewFollower;
use crate::model::media::{MediaType, NewMedia};
use crate::model::post::{NewPost, PostId};
use crate::model::user::{NewUser, UserId};
use crate::projection::{CommentView, FollowerView, MediaView, PostView, UserView};
use crate::repo::comment_repo::{CommentRepository, SqliteCommentRepository};
use crate::repo::follower_repo::{FollowerRepository, SqliteFollowerRepository};
use crate::repo::lookup::SqliteRecordLookup;
use crate::repo::media_repo::{MediaRepository, SqliteMediaRepository};
use crate::repo::post_repo::{PostRepository, SqlitePostRepository};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::{RepoError, RepoResult};
use rusqlite::Connection;

/// Use-case facade over all record repositories sharing one connection.
pub struct SocialService<'conn> {
    users: SqliteUserRepository<'conn>,
    posts: SqlitePostRepository<'conn>,
    comments: SqliteCommentRepository<'conn>,
    media: SqliteMediaRepository<'conn>,
    followers: SqliteFollowerRepository<'conn>,
    lookup: SqliteRecordLookup<'conn>,
}

impl<'conn> SocialService<'conn> {
    /// Builds the service from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self {
            users: SqliteUserRepository::try_new(conn)?,
            posts: SqlitePostRepository::try_new(conn)?,
            comments: SqliteCommentRepository::try_new(conn)?,
            media: SqliteMediaRepository::try_new(conn)?,
            followers: SqliteFollowerRepository::try_new(conn)?,
            lookup: SqliteRecordLookup::try_new(conn)?,
        })
    }

    /// Creates a user and returns its projection.
    pub fn register_user(&self, user: &NewUser) -> RepoResult<UserView> {
        let id = self.users.create_user(user)?;
        self.user_profile(id)?
            .ok_or(RepoError::NotFound { entity: "user", id })
    }

    pub fn user_profile(&self, id: UserId) -> RepoResult<Option<UserView>> {
        self.users
            .get_user(id)?
            .map(|user| user.serialize(&self.lookup))
            .transpose()
    }

    /// Creates an empty post owned by `user_id`.
    pub fn publish_post(&self, user_id: UserId) -> RepoResult<PostView> {
        self.require_user(user_id)?;
        let id = self.posts.create_post(&NewPost { user_id })?;
        self.post_view(id)?
            .ok_or(RepoError::NotFound { entity: "post", id })
    }

    pub fn post_view(&self, id: PostId) -> RepoResult<Option<PostView>> {
        self.posts
            .get_post(id)?
            .map(|post| post.serialize(&self.lookup))
            .transpose()
    }

    pub fn user_posts(&self, user_id: UserId) -> RepoResult<Vec<PostView>> {
        self.posts
            .list_posts_by_user(user_id)?
            .iter()
            .map(|post| post.serialize(&self.lookup))
            .collect()
    }

    pub fn comment_on_post(
        &self,
        author_id: UserId,
        post_id: PostId,
        comment_text: Option<String>,
    ) -> RepoResult<CommentView> {
        self.require_user(author_id)?;
        self.require_post(post_id)?;
        let id = self
            .comments
            .create_comment(&NewComment::new(author_id, post_id, comment_text))?;
        self.comments
            .get_comment(id)?
            .ok_or(RepoError::NotFound {
                entity: "comment",
                id,
            })?
            .serialize(&self.lookup)
    }

    pub fn post_comments(&self, post_id: PostId) -> RepoResult<Vec<CommentView>> {
        self.comments
            .list_comments_by_post(post_id)?
            .iter()
            .map(|comment| comment.serialize(&self.lookup))
            .collect()
    }

    pub fn attach_media(
        &self,
        post_id: PostId,
        url: Option<String>,
        kind: Option<MediaType>,
    ) -> RepoResult<MediaView> {
        self.require_post(post_id)?;
        let id = self.media.create_media(&NewMedia { url, kind, post_id })?;
        self.media
            .get_media(id)?
            .ok_or(RepoError::NotFound { entity: "media", id })?
            .serialize(&self.lookup)
    }

    pub fn post_media(&self, post_id: PostId) -> RepoResult<Vec<MediaView>> {
        self.media
            .list_media_by_post(post_id)?
            .iter()
            .map(|media| media.serialize(&self.lookup))
            .collect()
    }

    /// Records that `follower_id` follows `followed_id`.
    pub fn follow_user(
        &self,
        follower_id: UserId,
        followed_id: UserId,
    ) -> RepoResult<FollowerView> {
        self.require_user(follower_id)?;
        self.require_user(followed_id)?;
        let id = self.followers.follow(&NewFollower {
            follower_id,
            followed_id,
        })?;
        self.followers
            .get_follower(id)?
            .ok_or(RepoError::NotFound {
                entity: "followers",
                id,
            })?
            .serialize(&self.lookup)
    }

    /// Returns whether an edge was removed.
    pub fn unfollow_user(&self, follower_id: UserId, followed_id: UserId) -> RepoResult<bool> {
        self.followers.unfollow(follower_id, followed_id)
    }

    /// Edges pointing at `user_id`.
    pub fn followers_of(&self, user_id: UserId) -> RepoResult<Vec<FollowerView>> {
        self.followers
            .list_followers(user_id)?
            .iter()
            .map(|edge| edge.serialize(&self.lookup))
            .collect()
    }

    /// Edges leaving `user_id`.
    pub fn following_of(&self, user_id: UserId) -> RepoResult<Vec<FollowerView>> {
        self.followers
            .list_following(user_id)?
            .iter()
            .map(|edge| edge.serialize(&self.lookup))
            .collect()
    }

    fn require_user(&self, id: UserId) -> RepoResult<()> {
        match self.users.get_user(id)? {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound { entity: "user", id }),
        }
    }

    fn require_post(&self, id: PostId) -> RepoResult<()> {
        match self.posts.get_post(id)? {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound { entity: "post", id }),
        }
    }
}
