//! Plain text record output.
//!
//! # Layout
//!
//! ```text
//! Title: <title>
//! Description: <description>
//! Dates:
//! <date_1>
//! <date_2>
//! ```
//!
//! Every line ends with `\n`. A record without dates ends right after the
//! `Dates:` header.
//!
//! # Overwrite Semantics
//!
//! The destination is truncated before writing. Writes are not atomic: if a
//! write fails midway the file is left partial.

use crate::error::WriteError;
use crate::models::ExtractedRecord;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

/// Render `record` in the fixed text layout.
pub fn render(record: &ExtractedRecord) -> String {
    let mut out = format!(
        "Title: {}\nDescription: {}\nDates:\n",
        record.title, record.description
    );
    for date in &record.dates {
        out.push_str(date);
        out.push('\n');
    }
    out
}

/// Write `record` to `destination`, replacing any existing content.
///
/// The file is flushed and closed before this returns `Ok`.
///
/// # Errors
///
/// [`WriteError::Create`] if the file cannot be created or truncated,
/// [`WriteError::Write`] if the content cannot be fully written.
#[instrument(level = "info", skip_all, fields(destination = %destination.as_ref().display()))]
pub async fn write_record(
    destination: impl AsRef<Path>,
    record: &ExtractedRecord,
) -> Result<(), WriteError> {
    let path = destination.as_ref();
    let mut file = fs::File::create(path)
        .await
        .map_err(|source| WriteError::Create {
            path: path.to_path_buf(),
            source,
        })?;

    let content = render(record);
    let write_failed = |source: std::io::Error| WriteError::Write {
        path: path.to_path_buf(),
        source,
    };
    file.write_all(content.as_bytes()).await.map_err(write_failed)?;
    file.flush().await.map_err(write_failed)?;

    info!(
        bytes = content.len(),
        dates = record.dates.len(),
        "Wrote record"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record() -> ExtractedRecord {
        ExtractedRecord::new("T", "D", vec!["A".to_string(), "B".to_string()])
    }

    #[test]
    fn test_render_layout() {
        assert_eq!(render(&record()), "Title: T\nDescription: D\nDates:\nA\nB\n");
    }

    #[test]
    fn test_render_without_dates() {
        let record = ExtractedRecord::new("T", "D", vec![]);
        assert_eq!(render(&record), "Title: T\nDescription: D\nDates:\n");
    }

    #[tokio::test]
    async fn test_write_then_read_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("record.txt");

        write_record(&path, &record()).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Title: T\nDescription: D\nDates:\nA\nB\n"
        );
    }

    #[tokio::test]
    async fn test_write_twice_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("record.txt");

        write_record(&path, &record()).await.unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        write_record(&path, &record()).await.unwrap();
        let second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_write_truncates_longer_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("record.txt");
        std::fs::write(&path, "x".repeat(4096)).unwrap();

        let short = ExtractedRecord::new("S", "s", vec![]);
        write_record(&path, &short).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Title: S\nDescription: s\nDates:\n"
        );
    }

    #[tokio::test]
    async fn test_write_unicode_record() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("hurriyet.txt");
        let record = ExtractedRecord::new("Hürriyet", "Son dakika", vec!["2 saat önce".to_string()]);

        write_record(&path, &record).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Title: Hürriyet\nDescription: Son dakika\nDates:\n2 saat önce\n"
        );
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails_on_create() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("record.txt");

        let err = write_record(&path, &record()).await.unwrap_err();
        match err {
            WriteError::Create { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("expected Create, got {other:?}"),
        }
    }
}
