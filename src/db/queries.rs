use super::models::{LibraryStats, NewTrack, SampleRow};
use super::{Database, Result};
use rusqlite::{params, OptionalExtension};

impl Database {
    /// Insert an artist if the name is new. Returns the artist id either way.
    pub fn upsert_artist(&self, name: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO Artist (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
            params![name],
        )?;
        let id = self.conn.query_row(
            "SELECT id FROM Artist WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Insert a genre if the name is new. Returns the genre id either way.
    pub fn upsert_genre(&self, name: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO Genre (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
            params![name],
        )?;
        let id = self.conn.query_row(
            "SELECT id FROM Genre WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Insert an album if the title is new. Returns the album id.
    ///
    /// The first artist stored for a title is kept: a later call with the
    /// same title and a different artist leaves the association untouched.
    pub fn upsert_album(&self, title: &str, artist_id: i64) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO Album (title, artist_id) VALUES (?1, ?2)
             ON CONFLICT(title) DO NOTHING",
            params![title, artist_id],
        )?;
        let (id, stored_artist): (i64, i64) = self.conn.query_row(
            "SELECT id, artist_id FROM Album WHERE title = ?1",
            params![title],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        if stored_artist != artist_id {
            log::debug!(
                "Album \"{}\" already belongs to artist {}, ignoring artist {}",
                title,
                stored_artist,
                artist_id
            );
        }
        Ok(id)
    }

    /// Insert a track, or overwrite every attribute of the track with the same title.
    pub fn replace_track(&self, t: &NewTrack) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO Track (title, album_id, genre_id, length, rating, play_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(title) DO UPDATE SET
                album_id = excluded.album_id,
                genre_id = excluded.genre_id,
                length = excluded.length,
                rating = excluded.rating,
                play_count = excluded.play_count",
            params![t.title, t.album_id, t.genre_id, t.length, t.rating, t.play_count],
        )?;

        let id = self.conn.query_row(
            "SELECT id FROM Track WHERE title = ?1",
            params![t.title],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Look up a track by title, returning the stored record.
    pub fn find_track(&self, title: &str) -> Result<Option<NewTrack>> {
        let track = self
            .conn
            .query_row(
                "SELECT title, album_id, genre_id, length, rating, play_count
                 FROM Track WHERE title = ?1",
                params![title],
                |row| {
                    Ok(NewTrack {
                        title: row.get(0)?,
                        album_id: row.get(1)?,
                        genre_id: row.get(2)?,
                        length: row.get(3)?,
                        rating: row.get(4)?,
                        play_count: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(track)
    }

    /// Tracks with their artist, album and genre, ordered by artist name.
    pub fn sample_tracks(&self, limit: usize) -> Result<Vec<SampleRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT Track.title, Artist.name, Album.title, Genre.name
             FROM Track
             JOIN Genre ON Track.genre_id = Genre.id
             JOIN Album ON Track.album_id = Album.id
             JOIN Artist ON Album.artist_id = Artist.id
             ORDER BY Artist.name
             LIMIT ?1",
        )?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok(SampleRow {
                    track: row.get(0)?,
                    artist: row.get(1)?,
                    album: row.get(2)?,
                    genre: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Row counts for all four tables plus a per-genre breakdown.
    pub fn stats(&self) -> Result<LibraryStats> {
        let count = |table: &str| -> Result<i64> {
            let n = self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {table}"),
                [],
                |row| row.get(0),
            )?;
            Ok(n)
        };

        let total_length: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(length), 0) FROM Track",
            [],
            |row| row.get(0),
        )?;

        let mut stmt = self.conn.prepare(
            "SELECT Genre.name, COUNT(Track.id) AS n
             FROM Genre
             JOIN Track ON Track.genre_id = Genre.id
             GROUP BY Genre.id
             ORDER BY n DESC, Genre.name",
        )?;
        let genre_counts = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(LibraryStats {
            artists: count("Artist")?,
            genres: count("Genre")?,
            albums: count("Album")?,
            tracks: count("Track")?,
            total_length,
            genre_counts,
        })
    }
}
