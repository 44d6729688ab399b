use serde_json::json;
use socialnet_core::{
    open_db_in_memory, CommentRepository, Follower, FollowerRepository, MediaRepository,
    MediaType, NewComment, NewFollower, NewMedia, NewPost, NewUser, Post, PostRepository,
    SqliteCommentRepository, SqliteFollowerRepository, SqliteMediaRepository,
    SqlitePostRepository, SqliteRecordLookup, SqliteUserRepository, UserRepository,
};

#[test]
fn user_without_activity_serializes_with_zero_totals() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let lookup = SqliteRecordLookup::try_new(&conn).unwrap();
    let id = users
        .create_user(&NewUser::new("a@x.com", "secret").with_user_name("alice"))
        .unwrap();
    conn.execute(
        "UPDATE \"user\" SET created_at = 1700000000000 WHERE id = ?1;",
        [id],
    )
    .unwrap();

    let user = users.get_user(id).unwrap().unwrap();
    let json = serde_json::to_value(user.serialize(&lookup).unwrap()).unwrap();

    assert_eq!(
        json,
        json!({
            "id": id,
            "email": "a@x.com",
            "user_name": "alice",
            "first_name": null,
            "last_name": null,
            "total_posts": 0,
            "total_comments": 0,
            "created_at": "2023-11-14T22:13:20"
        })
    );
    assert!(json.get("password").is_none());
}

#[test]
fn user_with_unset_created_at_serializes_null() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let lookup = SqliteRecordLookup::try_new(&conn).unwrap();
    let id = users.create_user(&NewUser::new("a@x.com", "pw")).unwrap();
    conn.execute("UPDATE \"user\" SET created_at = NULL WHERE id = ?1;", [id])
        .unwrap();

    let view = users.get_user(id).unwrap().unwrap().serialize(&lookup).unwrap();
    assert_eq!(view.created_at, None);
}

#[test]
fn user_totals_track_owned_posts_and_comments() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let posts = SqlitePostRepository::try_new(&conn).unwrap();
    let comments = SqliteCommentRepository::try_new(&conn).unwrap();
    let lookup = SqliteRecordLookup::try_new(&conn).unwrap();

    let alice = users.create_user(&NewUser::new("a@x.com", "pw")).unwrap();
    let bob = users.create_user(&NewUser::new("b@x.com", "pw")).unwrap();
    let post_ids: Vec<_> = (0..3)
        .map(|_| posts.create_post(&NewPost { user_id: alice }).unwrap())
        .collect();
    let last_post = post_ids[2];
    comments
        .create_comment(&NewComment::new(bob, last_post, Some("nice".to_string())))
        .unwrap();
    comments
        .create_comment(&NewComment::new(alice, last_post, None))
        .unwrap();

    let alice_view = users.get_user(alice).unwrap().unwrap().serialize(&lookup).unwrap();
    assert_eq!(alice_view.total_posts, 3);
    assert_eq!(alice_view.total_comments, 1);

    let bob_view = users.get_user(bob).unwrap().unwrap().serialize(&lookup).unwrap();
    assert_eq!(bob_view.total_posts, 0);
    assert_eq!(bob_view.total_comments, 1);
}

#[test]
fn post_serializes_owner_user_name() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let lookup = SqliteRecordLookup::try_new(&conn).unwrap();
    let alice = users
        .create_user(&NewUser::new("a@x.com", "pw").with_user_name("alice"))
        .unwrap();
    conn.execute("INSERT INTO post (id, user_id) VALUES (5, ?1);", [alice])
        .unwrap();

    let post = SqlitePostRepository::try_new(&conn)
        .unwrap()
        .get_post(5)
        .unwrap()
        .unwrap();
    let json = serde_json::to_value(post.serialize(&lookup).unwrap()).unwrap();
    assert_eq!(json, json!({ "id": 5, "user": { "user_name": "alice" } }));
}

#[test]
fn post_with_unresolvable_owner_serializes_null_user() {
    let conn = open_db_in_memory().unwrap();
    let lookup = SqliteRecordLookup::try_new(&conn).unwrap();
    let detached = Post { id: 8, user_id: 123 };

    let json = serde_json::to_value(detached.serialize(&lookup).unwrap()).unwrap();
    assert_eq!(json, json!({ "id": 8, "user": null }));
}

#[test]
fn comment_serializes_text_and_author() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let lookup = SqliteRecordLookup::try_new(&conn).unwrap();
    let alice = users
        .create_user(&NewUser::new("a@x.com", "pw").with_user_name("alice"))
        .unwrap();
    let post = SqlitePostRepository::try_new(&conn)
        .unwrap()
        .create_post(&NewPost { user_id: alice })
        .unwrap();
    let comments = SqliteCommentRepository::try_new(&conn).unwrap();

    let silent = comments
        .create_comment(&NewComment::new(alice, post, None))
        .unwrap();
    let json = serde_json::to_value(
        comments
            .get_comment(silent)
            .unwrap()
            .unwrap()
            .serialize(&lookup)
            .unwrap(),
    )
    .unwrap();
    assert_eq!(
        json,
        json!({
            "id": silent,
            "comment_text": null,
            "author_id": { "id": alice, "user_name": "alice" }
        })
    );
}

#[test]
fn media_type_serializes_as_lowercase_value() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let lookup = SqliteRecordLookup::try_new(&conn).unwrap();
    let alice = users
        .create_user(&NewUser::new("a@x.com", "pw").with_user_name("alice"))
        .unwrap();
    let post = SqlitePostRepository::try_new(&conn)
        .unwrap()
        .create_post(&NewPost { user_id: alice })
        .unwrap();
    let media = SqliteMediaRepository::try_new(&conn).unwrap();

    for (kind, expected) in [
        (MediaType::Image, "image"),
        (MediaType::Video, "video"),
        (MediaType::Gif, "gif"),
    ] {
        let id = media
            .create_media(&NewMedia {
                url: Some(format!("https://cdn.example/{expected}")),
                kind: Some(kind),
                post_id: post,
            })
            .unwrap();
        let view = media.get_media(id).unwrap().unwrap().serialize(&lookup).unwrap();
        let json = serde_json::to_value(view).unwrap();
        assert_eq!(
            json,
            json!({
                "url_media": format!("https://cdn.example/{expected}"),
                "type": expected,
                "post_author": { "id": alice, "user_name": "alice" }
            })
        );
    }
}

#[test]
fn media_without_type_serializes_null_type() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let lookup = SqliteRecordLookup::try_new(&conn).unwrap();
    let alice = users.create_user(&NewUser::new("a@x.com", "pw")).unwrap();
    let post = SqlitePostRepository::try_new(&conn)
        .unwrap()
        .create_post(&NewPost { user_id: alice })
        .unwrap();
    let media = SqliteMediaRepository::try_new(&conn).unwrap();
    let id = media
        .create_media(&NewMedia {
            url: None,
            kind: None,
            post_id: post,
        })
        .unwrap();

    let json =
        serde_json::to_value(media.get_media(id).unwrap().unwrap().serialize(&lookup).unwrap())
            .unwrap();
    assert_eq!(json["type"], serde_json::Value::Null);
    assert_eq!(json["post_author"]["user_name"], serde_json::Value::Null);
}

#[test]
fn follower_edge_exposes_both_sides() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let lookup = SqliteRecordLookup::try_new(&conn).unwrap();
    let alice = users.create_user(&NewUser::new("a@x.com", "pw")).unwrap();
    let bob = users.create_user(&NewUser::new("b@x.com", "pw")).unwrap();
    let followers = SqliteFollowerRepository::try_new(&conn).unwrap();
    let id = followers
        .follow(&NewFollower {
            follower_id: alice,
            followed_id: bob,
        })
        .unwrap();

    let edge = followers.get_follower(id).unwrap().unwrap();
    let json = serde_json::to_value(edge.serialize(&lookup).unwrap()).unwrap();
    assert_eq!(
        json,
        json!({
            "id": id,
            "follower": { "id": alice, "email": "a@x.com" },
            "followed": { "id": bob, "email": "b@x.com" }
        })
    );

    let orphan = Follower {
        id: 99,
        follower_id: alice,
        followed_id: 500,
    };
    let view = orphan.serialize(&lookup).unwrap();
    assert!(view.follower.is_some());
    assert!(view.followed.is_none());
}

#[test]
fn post_owned_by_user_with_empty_email_still_serializes() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO \"user\" (id, email, password, user_name) VALUES (1, '', 'pw', 'alice');
         INSERT INTO post (id, user_id) VALUES (5, 1);",
    )
    .unwrap();
    let lookup = SqliteRecordLookup::try_new(&conn).unwrap();

    let post = SqlitePostRepository::try_new(&conn)
        .unwrap()
        .get_post(5)
        .unwrap()
        .unwrap();
    let json = serde_json::to_value(post.serialize(&lookup).unwrap()).unwrap();
    assert_eq!(json, json!({ "id": 5, "user": { "user_name": "alice" } }));
}
