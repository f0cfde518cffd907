use serde::Serialize;

/// Data for inserting or overwriting a track (import phase).
/// Foreign keys are resolved before this is built.
#[derive(Debug, Clone)]
pub struct NewTrack {
    pub title: String,
    pub album_id: i64,
    pub genre_id: i64,
    pub length: i64,
    pub rating: i64,
    pub play_count: i64,
}

/// One row of the verification query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleRow {
    pub track: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
}

/// Row counts for the `stats` command.
#[derive(Debug, Default)]
pub struct LibraryStats {
    pub artists: i64,
    pub genres: i64,
    pub albums: i64,
    pub tracks: i64,
    pub total_length: i64,
    /// Genre name and track count, most tracks first.
    pub genre_counts: Vec<(String, i64)>,
}
