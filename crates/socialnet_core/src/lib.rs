//! Data model and persistence for a small social network: users, posts,
//! comments, media attachments and follow edges, plus API-facing
//! projections of each record.

pub mod db;
pub mod logging;
pub mod model;
pub mod projection;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::comment::{Comment, CommentId, NewComment};
pub use model::follower::{Follower, FollowerId, NewFollower};
pub use model::media::{Media, MediaId, MediaType, NewMedia};
pub use model::post::{NewPost, Post, PostId};
pub use model::user::{NewUser, User, UserId};
pub use model::ValidationError;
pub use projection::{
    CommentView, FollowerView, MediaView, PostOwner, PostView, RecordLookup, UserContact,
    UserRef, UserView,
};
pub use repo::comment_repo::{CommentRepository, SqliteCommentRepository};
pub use repo::follower_repo::{FollowerRepository, SqliteFollowerRepository};
pub use repo::lookup::SqliteRecordLookup;
pub use repo::media_repo::{MediaRepository, SqliteMediaRepository};
pub use repo::post_repo::{PostRepository, SqlitePostRepository};
pub use repo::user_repo::{SqliteUserRepository, UserListQuery, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::social_service::SocialService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
