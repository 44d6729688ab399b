//! Record projections into API-facing views.
//!
//! # Responsibility
//! - Convert each record into a shallow, `serde`-serializable view.
//! - Resolve directly related records through [`RecordLookup`].
//!
//! # Invariants
//! - Wire field names are stable; consumers depend on them verbatim.
//! - An unresolvable related record becomes `null`, never an error.
//! - Storage failures during resolution propagate as `Err`.
//! - Credentials are never part of any view.

use crate::model::comment::{Comment, CommentId};
use crate::model::follower::{Follower, FollowerId};
use crate::model::media::{Media, MediaType};
use crate::model::post::{Post, PostId};
use crate::model::user::{User, UserId};
use crate::repo::RepoResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Accessor used by projections to resolve foreign keys on demand.
pub trait RecordLookup {
    fn find_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn find_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    fn count_posts_by_user(&self, id: UserId) -> RepoResult<u64>;
    fn count_comments_by_user(&self, id: UserId) -> RepoResult<u64>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub user_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub total_posts: u64,
    pub total_comments: u64,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    pub id: PostId,
    pub user: Option<PostOwner>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOwner {
    pub user_name: Option<String>,
}

/// `{id, user_name}` summary of a related user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub user_name: Option<String>,
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: CommentId,
    pub comment_text: Option<String>,
    /// Emitted as `author_id` although it carries the author summary.
    #[serde(rename = "author_id")]
    pub author: Option<UserRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaView {
    #[serde(rename = "url_media")]
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<MediaType>,
    pub post_author: Option<UserRef>,
}

/// `{id, email}` summary of one side of a follow edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContact {
    pub id: UserId,
    pub email: String,
}

impl From<&User> for UserContact {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowerView {
    pub id: FollowerId,
    pub follower: Option<UserContact>,
    pub followed: Option<UserContact>,
}

impl User {
    /// Projects the user with post/comment totals.
    pub fn serialize<L: RecordLookup + ?Sized>(&self, lookup: &L) -> RepoResult<UserView> {
        Ok(UserView {
            id: self.id,
            email: self.email.clone(),
            user_name: self.user_name.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            total_posts: lookup.count_posts_by_user(self.id)?,
            total_comments: lookup.count_comments_by_user(self.id)?,
            created_at: self.created_at.and_then(format_timestamp),
        })
    }
}

impl Post {
    pub fn serialize<L: RecordLookup + ?Sized>(&self, lookup: &L) -> RepoResult<PostView> {
        let user = lookup.find_user(self.user_id)?.map(|owner| PostOwner {
            user_name: owner.user_name,
        });
        Ok(PostView { id: self.id, user })
    }
}

impl Comment {
    pub fn serialize<L: RecordLookup + ?Sized>(&self, lookup: &L) -> RepoResult<CommentView> {
        let author = lookup.find_user(self.author_id)?;
        Ok(CommentView {
            id: self.id,
            comment_text: self.comment_text.clone(),
            author: author.as_ref().map(UserRef::from),
        })
    }
}

impl Media {
    /// Projects the attachment with the author of its post, resolved in two hops.
    pub fn serialize<L: RecordLookup + ?Sized>(&self, lookup: &L) -> RepoResult<MediaView> {
        let post_author = match lookup.find_post(self.post_id)? {
            Some(post) => lookup.find_user(post.user_id)?,
            None => None,
        };
        Ok(MediaView {
            url: self.url.clone(),
            kind: self.kind,
            post_author: post_author.as_ref().map(UserRef::from),
        })
    }
}

impl Follower {
    pub fn serialize<L: RecordLookup + ?Sized>(&self, lookup: &L) -> RepoResult<FollowerView> {
        let follower = lookup.find_user(self.follower_id)?;
        let followed = lookup.find_user(self.followed_id)?;
        Ok(FollowerView {
            id: self.id,
            follower: follower.as_ref().map(UserContact::from),
            followed: followed.as_ref().map(UserContact::from),
        })
    }
}

/// Renders epoch milliseconds as a naive UTC ISO-8601 timestamp.
///
/// Fractional seconds are printed with microsecond width and omitted when
/// zero (`2023-11-14T22:13:20`, `2023-11-14T22:13:20.123000`).
/// Returns `None` for values outside the representable range.
pub fn format_timestamp(epoch_ms: i64) -> Option<String> {
    let moment = DateTime::<Utc>::from_timestamp_millis(epoch_ms)?;
    let mut formatted = moment.format("%Y-%m-%dT%H:%M:%S").to_string();
    let micros = moment.timestamp_subsec_micros();
    if micros != 0 {
        formatted.push_str(&format!(".{micros:06}"));
    }
    Some(formatted)
}
