//! Post record. Owned by exactly one user.

use super::user::UserId;

pub type PostId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewPost {
    pub user_id: UserId,
}
