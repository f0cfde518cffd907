/// Cells that mark the first row as a header (compared trimmed and lowercased).
pub const HEADER_KEYWORDS: &[&str] = &[
    "track",
    "name",
    "artist",
    "album",
    "genre",
    "count",
    "rating",
    "length",
    "total time",
    "play count",
];

/// A column the importer knows how to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Artist,
    Album,
    Genre,
    Count,
    Rating,
    Length,
}

/// Header aliases per field. For each field the aliases are tried in order,
/// and the first header cell containing the alias wins.
pub const FIELD_ALIASES: &[(Field, &[&str])] = &[
    (Field::Name, &["track", "name", "title"]),
    (Field::Artist, &["artist"]),
    (Field::Album, &["album", "album title"]),
    (Field::Genre, &["genre"]),
    (Field::Count, &["count", "play count"]),
    (Field::Rating, &["rating"]),
    (Field::Length, &["length", "total time", "time"]),
];

/// Position of each field in a row. `None` means the input has no such column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: Option<usize>,
    pub artist: Option<usize>,
    pub album: Option<usize>,
    pub genre: Option<usize>,
    pub count: Option<usize>,
    pub rating: Option<usize>,
    pub length: Option<usize>,
}

impl ColumnMap {
    /// Track, Artist, Album, Genre, Count, Rating, Length
    pub const SEVEN_COLUMNS: ColumnMap = ColumnMap {
        name: Some(0),
        artist: Some(1),
        album: Some(2),
        genre: Some(3),
        count: Some(4),
        rating: Some(5),
        length: Some(6),
    };

    /// Track, Artist, Album, Count, Rating, Length
    pub const SIX_COLUMNS: ColumnMap = ColumnMap {
        name: Some(0),
        artist: Some(1),
        album: Some(2),
        genre: None,
        count: Some(3),
        rating: Some(4),
        length: Some(5),
    };

    pub fn get(&self, field: Field) -> Option<usize> {
        match field {
            Field::Name => self.name,
            Field::Artist => self.artist,
            Field::Album => self.album,
            Field::Genre => self.genre,
            Field::Count => self.count,
            Field::Rating => self.rating,
            Field::Length => self.length,
        }
    }

    fn set(&mut self, field: Field, index: Option<usize>) {
        match field {
            Field::Name => self.name = index,
            Field::Artist => self.artist = index,
            Field::Album => self.album = index,
            Field::Genre => self.genre = index,
            Field::Count => self.count = index,
            Field::Rating => self.rating = index,
            Field::Length => self.length = index,
        }
    }

    /// Map fields by header label using [`FIELD_ALIASES`].
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Self {
        let lowered: Vec<String> = header
            .iter()
            .map(|c| c.as_ref().trim().to_lowercase())
            .collect();

        let mut map = ColumnMap {
            name: None,
            artist: None,
            album: None,
            genre: None,
            count: None,
            rating: None,
            length: None,
        };
        for (field, aliases) in FIELD_ALIASES {
            map.set(*field, find_column(&lowered, aliases));
        }
        map
    }

    /// Guess the layout of a headerless file from the width of its first row.
    ///
    /// Widths other than 6 fall back to the 7-column layout; rows that don't
    /// fit it end up skipped or with defaulted numbers.
    pub fn positional(width: usize) -> Self {
        match width {
            6 => Self::SIX_COLUMNS,
            7 => Self::SEVEN_COLUMNS,
            other => {
                log::warn!(
                    "First row has {} cells and no header; assuming the 7-column layout",
                    other
                );
                Self::SEVEN_COLUMNS
            }
        }
    }
}

/// How to read the rows: where each field lives and where data begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub columns: ColumnMap,
    pub has_header: bool,
}

impl Layout {
    /// Index of the first data row.
    pub fn data_start(&self) -> usize {
        if self.has_header { 1 } else { 0 }
    }
}

/// True if any cell of `row` is exactly one of [`HEADER_KEYWORDS`].
pub fn is_header<S: AsRef<str>>(row: &[S]) -> bool {
    row.iter().any(|cell| {
        let lower = cell.as_ref().trim().to_lowercase();
        HEADER_KEYWORDS.contains(&lower.as_str())
    })
}

/// Decide the layout from the first non-blank row.
pub fn resolve_layout<S: AsRef<str>>(first_row: &[S]) -> Layout {
    if is_header(first_row) {
        Layout {
            columns: ColumnMap::from_header(first_row),
            has_header: true,
        }
    } else {
        Layout {
            columns: ColumnMap::positional(first_row.len()),
            has_header: false,
        }
    }
}

/// Index of the first cell containing the earliest alias that appears at all.
fn find_column(header: &[String], aliases: &[&str]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| header.iter().position(|cell| cell.contains(alias)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_detected_case_insensitively() {
        assert!(is_header(&["TRACK", "x", "y"]));
        assert!(is_header(&[" Play Count "]));
        assert!(is_header(&["Title", "Artist", "Album"]));
    }

    #[test]
    fn test_header_requires_exact_keyword() {
        // "title" is an alias but not a header keyword
        assert!(!is_header(&["Title", "Singer", "Record"]));
        // Substrings of data don't count
        assert!(!is_header(&["Track 01", "The Artists", "Best Album"]));
    }

    #[test]
    fn test_from_header_title_layout() {
        let header = ["Title", "Artist", "Album", "Genre", "Count", "Rating", "Length"];
        assert_eq!(ColumnMap::from_header(&header), ColumnMap::SEVEN_COLUMNS);
    }

    #[test]
    fn test_from_header_itunes_layout() {
        let header = ["Name", "Artist", "Album", "Play Count", "Rating", "Total Time"];
        let map = ColumnMap::from_header(&header);
        assert_eq!(map.name, Some(0));
        assert_eq!(map.artist, Some(1));
        assert_eq!(map.album, Some(2));
        assert_eq!(map.genre, None);
        assert_eq!(map.count, Some(3));
        assert_eq!(map.rating, Some(4));
        assert_eq!(map.length, Some(5));
    }

    #[test]
    fn test_from_header_reordered_columns() {
        let header = ["Genre", "Length", "Album", "Artist", "Track", "Rating", "Count"];
        let map = ColumnMap::from_header(&header);
        assert_eq!(map.genre, Some(0));
        assert_eq!(map.length, Some(1));
        assert_eq!(map.album, Some(2));
        assert_eq!(map.artist, Some(3));
        assert_eq!(map.name, Some(4));
        assert_eq!(map.rating, Some(5));
        assert_eq!(map.count, Some(6));
    }

    #[test]
    fn test_alias_order_beats_column_order() {
        // "name" comes before "track" in the row, but "track" is the earlier alias
        let header = ["Name", "Track", "Artist", "Album"];
        let map = ColumnMap::from_header(&header);
        assert_eq!(map.name, Some(1));
    }

    #[test]
    fn test_alias_matches_substring() {
        let header = ["Song Name", "Lead Artist", "Album Title", "Duration Time"];
        let map = ColumnMap::from_header(&header);
        assert_eq!(map.name, Some(0));
        assert_eq!(map.artist, Some(1));
        assert_eq!(map.album, Some(2));
        assert_eq!(map.length, Some(3));
        assert_eq!(map.count, None);
    }

    #[test]
    fn test_positional_widths() {
        assert_eq!(ColumnMap::positional(7), ColumnMap::SEVEN_COLUMNS);
        assert_eq!(ColumnMap::positional(6), ColumnMap::SIX_COLUMNS);
        assert_eq!(ColumnMap::positional(3), ColumnMap::SEVEN_COLUMNS);
        assert_eq!(ColumnMap::positional(9), ColumnMap::SEVEN_COLUMNS);
    }

    #[test]
    fn test_resolve_layout() {
        let header = resolve_layout(&["Track", "Artist", "Album"]);
        assert!(header.has_header);
        assert_eq!(header.data_start(), 1);

        let data = resolve_layout(&["Song", "Band", "Record", "5", "90", "210"]);
        assert!(!data.has_header);
        assert_eq!(data.data_start(), 0);
        assert_eq!(data.columns, ColumnMap::SIX_COLUMNS);
    }

    #[test]
    fn test_get_matches_fields() {
        let map = ColumnMap::SIX_COLUMNS;
        assert_eq!(map.get(Field::Genre), None);
        assert_eq!(map.get(Field::Length), Some(5));
    }
}
