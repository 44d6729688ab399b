//! Directed follow edge between two users.

use super::user::UserId;

pub type FollowerId = i64;

/// One row of the `followers` table: `follower_id` follows `followed_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Follower {
    pub id: FollowerId,
    pub follower_id: UserId,
    pub followed_id: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewFollower {
    pub follower_id: UserId,
    pub followed_id: UserId,
}
