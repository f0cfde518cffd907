use super::columns::ColumnMap;

/// Genre stored for tracks when the input has no genre column.
pub const UNKNOWN_GENRE: &str = "Unknown";

/// A row with its required fields present, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub count: i64,
    pub rating: i64,
    pub length: i64,
}

/// Parse an integer, returning `default` for anything that isn't one.
pub fn parse_int_or_default(text: Option<&str>, default: i64) -> i64 {
    text.and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

/// True if every cell is empty or whitespace.
pub fn is_blank<S: AsRef<str>>(row: &[S]) -> bool {
    row.iter().all(|cell| cell.as_ref().trim().is_empty())
}

/// Trimmed cell at `index`, or `None` for an absent column or a short row.
fn cell<S: AsRef<str>>(row: &[S], index: Option<usize>) -> Option<&str> {
    index
        .and_then(|i| row.get(i))
        .map(|c| c.as_ref().trim())
}

fn required<S: AsRef<str>>(row: &[S], index: Option<usize>) -> Option<String> {
    cell(row, index)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl TrackRow {
    /// Pull the mapped fields out of `row`.
    ///
    /// Returns `None` when the name, artist or album is missing or empty.
    /// Numeric fields fall back to 0; a missing genre becomes [`UNKNOWN_GENRE`].
    pub fn from_cells<S: AsRef<str>>(row: &[S], columns: &ColumnMap) -> Option<Self> {
        let name = required(row, columns.name)?;
        let artist = required(row, columns.artist)?;
        let album = required(row, columns.album)?;

        // An empty genre cell is kept as-is; only a missing one is defaulted
        let genre = cell(row, columns.genre)
            .unwrap_or(UNKNOWN_GENRE)
            .to_string();

        Some(Self {
            name,
            artist,
            album,
            genre,
            count: parse_int_or_default(cell(row, columns.count), 0),
            rating: parse_int_or_default(cell(row, columns.rating), 0),
            length: parse_int_or_default(cell(row, columns.length), 0),
        })
    }
}
