//! Media repository contract and SQLite implementation.
//!
//! # Invariants
//! - The `type` column stores the variant name (`IMAGE`, `VIDEO`, `GIF`)
//!   so rows written by earlier deployments stay readable.
//! - Unknown `type` values are rejected on read as `InvalidData`.

use super::{ensure_connection_ready, RepoError, RepoResult, MEDIA_LAYOUT};
use crate::model::media::{Media, MediaId, MediaType, NewMedia};
use crate::model::post::PostId;
use log::debug;
use rusqlite::{params, Connection, Params, Row};

const MEDIA_SELECT_SQL: &str = "SELECT
    id,
    url,
    type,
    post_id
FROM media";

/// Repository interface for media attachments.
pub trait MediaRepository {
    fn create_media(&self, media: &NewMedia) -> RepoResult<MediaId>;
    fn get_media(&self, id: MediaId) -> RepoResult<Option<Media>>;
    fn update_media(&self, media: &Media) -> RepoResult<()>;
    fn delete_media(&self, id: MediaId) -> RepoResult<()>;
    /// Attachments of `post_id`, in insertion order.
    fn list_media_by_post(&self, post_id: PostId) -> RepoResult<Vec<Media>>;
}

/// SQLite-backed media repository.
pub struct SqliteMediaRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMediaRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[MEDIA_LAYOUT])?;
        Ok(Self { conn })
    }

    fn query_many<P: Params>(&self, filter: &str, params: P) -> RepoResult<Vec<Media>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEDIA_SELECT_SQL} {filter} ORDER BY id ASC;"))?;
        let mut rows = stmt.query(params)?;
        let mut media = Vec::new();
        while let Some(row) = rows.next()? {
            media.push(parse_media_row(row)?);
        }
        Ok(media)
    }
}

impl MediaRepository for SqliteMediaRepository<'_> {
    fn create_media(&self, media: &NewMedia) -> RepoResult<MediaId> {
        self.conn.execute(
            "INSERT INTO media (url, type, post_id) VALUES (?1, ?2, ?3);",
            params![
                media.url.as_deref(),
                media.kind.map(media_type_to_db),
                media.post_id
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(
            "event=media_create module=repo status=ok media_id={id} post_id={}",
            media.post_id
        );
        Ok(id)
    }

    fn get_media(&self, id: MediaId) -> RepoResult<Option<Media>> {
        Ok(self.query_many("WHERE id = ?1", [id])?.into_iter().next())
    }

    fn update_media(&self, media: &Media) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE media SET url = ?1, type = ?2, post_id = ?3 WHERE id = ?4;",
            params![
                media.url.as_deref(),
                media.kind.map(media_type_to_db),
                media.post_id,
                media.id
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "media",
                id: media.id,
            });
        }

        debug!(
            "event=media_update module=repo status=ok media_id={}",
            media.id
        );
        Ok(())
    }

    fn delete_media(&self, id: MediaId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM media WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "media", id });
        }

        debug!("event=media_delete module=repo status=ok media_id={id}");
        Ok(())
    }

    fn list_media_by_post(&self, post_id: PostId) -> RepoResult<Vec<Media>> {
        self.query_many("WHERE post_id = ?1", [post_id])
    }
}

fn parse_media_row(row: &Row<'_>) -> RepoResult<Media> {
    let kind = match row.get::<_, Option<String>>("type")? {
        Some(value) => Some(parse_media_type(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid media type `{value}` in media.type"))
        })?),
        None => None,
    };

    Ok(Media {
        id: row.get("id")?,
        url: row.get("url")?,
        kind,
        post_id: row.get("post_id")?,
    })
}

fn media_type_to_db(kind: MediaType) -> &'static str {
    match kind {
        MediaType::Image => "IMAGE",
        MediaType::Video => "VIDEO",
        MediaType::Gif => "GIF",
    }
}

fn parse_media_type(value: &str) -> Option<MediaType> {
    match value {
        "IMAGE" => Some(MediaType::Image),
        "VIDEO" => Some(MediaType::Video),
        "GIF" => Some(MediaType::Gif),
        _ => None,
    }
}
