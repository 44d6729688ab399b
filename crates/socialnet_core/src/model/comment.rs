//! Comment record, attached to one post and authored by one user.

use super::post::PostId;
use super::user::UserId;

pub type CommentId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    /// Free text; absent text is valid.
    pub comment_text: Option<String>,
    pub author_id: UserId,
    pub post_id: PostId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub comment_text: Option<String>,
    pub author_id: UserId,
    pub post_id: PostId,
}

impl NewComment {
    pub fn new(author_id: UserId, post_id: PostId, comment_text: Option<String>) -> Self {
        Self {
            comment_text,
            author_id,
            post_id,
        }
    }
}
