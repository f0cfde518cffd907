pub mod config;
pub mod db;
pub mod importer;

/// Application name for XDG paths
pub const APP_NAME: &str = "trackdb";

/// Database file created in the working directory by default
pub const DEFAULT_DB_NAME: &str = "trackdb.sqlite";

/// CSV file read by `import` when no path is given
pub const DEFAULT_CSV_NAME: &str = "tracks.csv";
