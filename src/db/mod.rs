pub mod models;
pub mod queries;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Tables in dependency order: parents before children.
const TABLES: &[&str] = &["Artist", "Genre", "Album", "Track"];

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS Artist (
        id      INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT UNIQUE,
        name    TEXT UNIQUE
    );

    CREATE TABLE IF NOT EXISTS Genre (
        id      INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT UNIQUE,
        name    TEXT UNIQUE
    );

    CREATE TABLE IF NOT EXISTS Album (
        id          INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT UNIQUE,
        artist_id   INTEGER NOT NULL REFERENCES Artist(id),
        title       TEXT UNIQUE
    );

    CREATE TABLE IF NOT EXISTS Track (
        id          INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT UNIQUE,
        title       TEXT UNIQUE,
        album_id    INTEGER NOT NULL REFERENCES Album(id),
        genre_id    INTEGER NOT NULL REFERENCES Genre(id),
        length      INTEGER,
        rating      INTEGER,
        play_count  INTEGER
    );

    CREATE INDEX IF NOT EXISTS idx_album_artist ON Album(artist_id);
    CREATE INDEX IF NOT EXISTS idx_track_album ON Track(album_id);
    CREATE INDEX IF NOT EXISTS idx_track_genre ON Track(genre_id);
";

/// Handle to the track library. The connection is closed when this is dropped.
pub struct Database {
    pub conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    fn init(&self) -> Result<()> {
        self.conn.pragma_update(None, "foreign_keys", "ON")?;
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Drop all four tables and create them empty. Destroys any existing data.
    pub fn reset_schema(&self) -> Result<()> {
        // Children first, or the implicit DELETE trips the foreign keys
        for table in TABLES.iter().rev() {
            self.conn
                .execute_batch(&format!("DROP TABLE IF EXISTS {table};"))?;
        }
        self.conn.execute_batch(SCHEMA)?;
        log::debug!("Recreated tables: {}", TABLES.join(", "));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_count(db: &Database) -> i64 {
        db.conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master
                 WHERE type = 'table' AND name IN ('Artist', 'Genre', 'Album', 'Track')",
                [],
                |r| r.get(0),
            )
            .unwrap()
    }

    #[test]
    fn test_open_creates_tables() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(table_count(&db), 4);
    }

    #[test]
    fn test_reset_schema_discards_rows() {
        let db = Database::open_in_memory().unwrap();
        let artist_id = db.upsert_artist("Band X").unwrap();
        db.upsert_album("Album Y", artist_id).unwrap();

        db.reset_schema().unwrap();

        assert_eq!(table_count(&db), 4);
        let stats = db.stats().unwrap();
        assert_eq!(stats.artists, 0);
        assert_eq!(stats.albums, 0);
    }

    #[test]
    fn test_reset_restarts_ids() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_artist("A").unwrap();
        db.upsert_artist("B").unwrap();
        db.reset_schema().unwrap();
        assert_eq!(db.upsert_artist("C").unwrap(), 1);
    }

    #[test]
    fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("trackdb.sqlite");
        {
            let db = Database::open(&path).unwrap();
            db.upsert_artist("Band X").unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.stats().unwrap().artists, 1);
    }
}
