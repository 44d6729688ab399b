use rusqlite::Connection;
use socialnet_core::db::migrations::latest_version;
use socialnet_core::{
    open_db_in_memory, NewPost, NewUser, PostRepository, RepoError, SqlitePostRepository,
    SqliteUserRepository, UserListQuery, UserRepository,
};

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let id = repo
        .create_user(&NewUser::new("a@x.com", "pw").with_user_name("alice"))
        .unwrap();

    let loaded = repo.get_user(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.email, "a@x.com");
    assert_eq!(loaded.password, "pw");
    assert_eq!(loaded.user_name.as_deref(), Some("alice"));
    assert_eq!(loaded.first_name, None);
    assert!(loaded.created_at.is_some());
}

#[test]
fn lookups_by_email_and_user_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let id = repo
        .create_user(&NewUser::new("a@x.com", "pw").with_user_name("alice"))
        .unwrap();

    assert_eq!(repo.get_user_by_email("a@x.com").unwrap().unwrap().id, id);
    assert_eq!(repo.get_user_by_name("alice").unwrap().unwrap().id, id);
    assert!(repo.get_user_by_email("b@x.com").unwrap().is_none());
    assert!(repo.get_user(id + 1).unwrap().is_none());
}

#[test]
fn duplicate_email_and_user_name_are_constraint_violations() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    repo.create_user(&NewUser::new("a@x.com", "pw").with_user_name("alice"))
        .unwrap();

    let err = repo.create_user(&NewUser::new("a@x.com", "pw")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::ConstraintViolation(ref message) if message.contains("user.email")
    ));

    let err = repo
        .create_user(&NewUser::new("b@x.com", "pw").with_user_name("alice"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::ConstraintViolation(ref message) if message.contains("user.user_name")
    ));
}

#[test]
fn users_without_user_name_do_not_collide() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    repo.create_user(&NewUser::new("a@x.com", "pw")).unwrap();
    repo.create_user(&NewUser::new("b@x.com", "pw")).unwrap();
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let err = repo.create_user(&NewUser::new("broken", "pw")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let id = repo.create_user(&NewUser::new("a@x.com", "pw")).unwrap();
    let mut user = repo.get_user(id).unwrap().unwrap();
    user.password = String::new();
    let err = repo.update_user(&user).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn update_rewrites_fields_but_keeps_created_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let id = repo.create_user(&NewUser::new("a@x.com", "pw")).unwrap();
    conn.execute(
        "UPDATE \"user\" SET created_at = 1700000000000 WHERE id = ?1;",
        [id],
    )
    .unwrap();

    let mut user = repo.get_user(id).unwrap().unwrap();
    user.email = "alice@x.com".to_string();
    user.first_name = Some("Alice".to_string());
    user.created_at = Some(42);
    repo.update_user(&user).unwrap();

    let loaded = repo.get_user(id).unwrap().unwrap();
    assert_eq!(loaded.email, "alice@x.com");
    assert_eq!(loaded.first_name.as_deref(), Some("Alice"));
    assert_eq!(loaded.created_at, Some(1_700_000_000_000));
}

#[test]
fn update_and_delete_missing_user_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let id = repo.create_user(&NewUser::new("a@x.com", "pw")).unwrap();
    let mut user = repo.get_user(id).unwrap().unwrap();
    repo.delete_user(id).unwrap();

    user.first_name = Some("gone".to_string());
    let err = repo.update_user(&user).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "user", id: missing } if missing == id));

    let err = repo.delete_user(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "user", .. }));
}

#[test]
fn deleting_user_with_posts_is_rejected_by_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let posts = SqlitePostRepository::try_new(&conn).unwrap();
    let id = users.create_user(&NewUser::new("a@x.com", "pw")).unwrap();
    posts.create_post(&NewPost { user_id: id }).unwrap();

    let err = users.delete_user(id).unwrap_err();
    assert!(matches!(err, RepoError::ConstraintViolation(_)));
    assert!(users.get_user(id).unwrap().is_some());
}

#[test]
fn list_users_paginates_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let ids: Vec<_> = ["a@x.com", "b@x.com", "c@x.com"]
        .into_iter()
        .map(|email| repo.create_user(&NewUser::new(email, "pw")).unwrap())
        .collect();

    let all = repo.list_users(&UserListQuery::default()).unwrap();
    assert_eq!(all.iter().map(|user| user.id).collect::<Vec<_>>(), ids);

    let page = repo
        .list_users(&UserListQuery {
            limit: Some(1),
            offset: 1,
        })
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, ids[1]);

    let tail = repo
        .list_users(&UserListQuery {
            limit: None,
            offset: 2,
        })
        .unwrap();
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].id, ids[2]);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteUserRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_user_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteUserRepository::try_new(&conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("user"))));
}

#[test]
fn stored_rows_are_read_without_write_side_validation() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO \"user\" (id, email, password, user_name) VALUES (1, '', '', 'alice');",
        [],
    )
    .unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let loaded = repo.get_user(1).unwrap().unwrap();
    assert_eq!(loaded.email, "");
    assert_eq!(loaded.user_name.as_deref(), Some("alice"));
}
