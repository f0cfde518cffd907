pub mod columns;
pub mod row;

use crate::db::models::NewTrack;
use crate::db::Database;
use indicatif::{ProgressBar, ProgressStyle};
use row::TrackRow;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Database error: {0}")]
    Db(#[from] crate::db::DbError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Data rows considered, excluding blank rows and the header.
    pub rows: u64,
    pub imported: u64,
    pub skipped: u64,
    pub has_header: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The input had no non-blank rows. Tables were recreated but left empty.
    NoData,
    Imported(ImportSummary),
}

/// Recreate the tables and load the CSV file at `path` into them.
pub fn import_file(db: &Database, path: &Path) -> Result<ImportOutcome, ImportError> {
    db.reset_schema()?;
    let file = File::open(path)?;
    log::info!("Reading {}", path.display());
    let rows = read_rows(file)?;
    import_rows(db, rows)
}

/// Same as [`import_file`] for any reader.
pub fn import_reader<R: Read>(db: &Database, reader: R) -> Result<ImportOutcome, ImportError> {
    db.reset_schema()?;
    let rows = read_rows(reader)?;
    import_rows(db, rows)
}

/// Read every record as a list of cells. No header handling, ragged rows allowed.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Vec<String>>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Ingest rows into the (already created) tables in a single transaction.
pub fn import_rows(db: &Database, rows: Vec<Vec<String>>) -> Result<ImportOutcome, ImportError> {
    let rows: Vec<Vec<String>> = rows.into_iter().filter(|r| !row::is_blank(r)).collect();

    let Some(first) = rows.first() else {
        log::info!("No non-blank rows in input");
        return Ok(ImportOutcome::NoData);
    };

    let layout = columns::resolve_layout(first);
    log::debug!("Column layout: {:?}", layout);

    let data = &rows[layout.data_start()..];
    let pb = ProgressBar::new(data.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message("Importing...");

    let mut summary = ImportSummary {
        rows: 0,
        imported: 0,
        skipped: 0,
        has_header: layout.has_header,
    };

    // Dropping the transaction on an error path rolls everything back
    let tx = db.conn.unchecked_transaction().map_err(crate::db::DbError::from)?;

    for (offset, cells) in data.iter().enumerate() {
        summary.rows += 1;
        match TrackRow::from_cells(cells, &layout.columns) {
            Some(track) => {
                store_row(db, &track)?;
                summary.imported += 1;
            }
            None => {
                log::debug!(
                    "Skipping row {}: missing track, artist or album: {:?}",
                    offset + layout.data_start() + 1,
                    cells
                );
                summary.skipped += 1;
            }
        }
        pb.inc(1);
    }

    tx.commit().map_err(crate::db::DbError::from)?;

    pb.finish_with_message(format!(
        "Done: {} imported, {} skipped",
        summary.imported, summary.skipped
    ));

    Ok(ImportOutcome::Imported(summary))
}

/// Parents first so the track's foreign keys always resolve.
fn store_row(db: &Database, t: &TrackRow) -> Result<i64, ImportError> {
    let artist_id = db.upsert_artist(&t.artist)?;
    let genre_id = db.upsert_genre(&t.genre)?;
    let album_id = db.upsert_album(&t.album, artist_id)?;
    let id = db.replace_track(&NewTrack {
        title: t.name.clone(),
        album_id,
        genre_id,
        length: t.length,
        rating: t.rating,
        play_count: t.count,
    })?;
    Ok(id)
}
