//! Interactive menu and batch runs over the source registry.
//!
//! The menu is a dispatch table built from the registry: each source gets a
//! numbered key that maps to a collect command, and `q` maps to quit. The
//! table only routes; collecting and writing happen in
//! [`collect_source`](crate::collector::collect_source).
//!
//! A failed run is reported and the menu keeps going.

use crate::collector::collect_source;
use crate::error::RunError;
use crate::fetcher::Fetch;
use crate::scrapers::{Source, SourceRegistry};
use futures::stream::{self, StreamExt};
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, instrument, warn};

/// What a menu key does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Collect the source with this id.
    Collect(String),
    Quit,
}

/// One line of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub key: String,
    pub label: String,
    pub command: Command,
}

/// Build the dispatch table for `registry`: `1..=n` in registry order, then
/// `q`.
pub fn menu_entries(registry: &SourceRegistry) -> Vec<MenuEntry> {
    let mut entries: Vec<MenuEntry> = registry
        .iter()
        .enumerate()
        .map(|(i, source)| MenuEntry {
            key: (i + 1).to_string(),
            label: format!("Collect from {}", source.label),
            command: Command::Collect(source.id.clone()),
        })
        .collect();
    entries.push(MenuEntry {
        key: "q".to_string(),
        label: "Quit".to_string(),
        command: Command::Quit,
    });
    entries
}

/// Find the command bound to `input`, ignoring surrounding whitespace and
/// case.
pub fn lookup<'a>(entries: &'a [MenuEntry], input: &str) -> Option<&'a Command> {
    let input = input.trim();
    entries
        .iter()
        .find(|entry| entry.key.eq_ignore_ascii_case(input))
        .map(|entry| &entry.command)
}

pub fn render_menu(entries: &[MenuEntry]) -> String {
    let mut out = String::from("\n--- Page Digest ---\n");
    for entry in entries {
        out.push_str(&format!("{} - {}\n", entry.key, entry.label));
    }
    out.push_str("Choice: ");
    out
}

/// One line per registered source: id, label, URL and default output file.
pub fn render_listing(registry: &SourceRegistry) -> String {
    registry
        .iter()
        .map(|s| format!("{}\t{}\t{}\t{}\n", s.id, s.label, s.url, s.output))
        .collect()
}

/// A fetcher, a registry and an output directory: everything a run needs.
#[derive(Debug)]
pub struct Shell<F> {
    fetcher: F,
    registry: SourceRegistry,
    output_dir: PathBuf,
}

impl<F> Shell<F>
where
    F: Fetch,
{
    pub fn new(fetcher: F, registry: SourceRegistry, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            registry,
            output_dir: output_dir.into(),
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Default destination for `source`: its output file inside the output
    /// directory.
    pub fn destination_for(&self, source: &Source) -> PathBuf {
        self.output_dir.join(&source.output)
    }

    /// Collect one source and write its record.
    ///
    /// `url` and `output` override the source's page and destination.
    /// Returns the path written.
    #[instrument(level = "info", skip(self))]
    pub async fn run_source(
        &self,
        id: &str,
        url: Option<&str>,
        output: Option<&Path>,
    ) -> Result<PathBuf, RunError> {
        let source = self
            .registry
            .get(id)
            .ok_or_else(|| RunError::UnknownSource(id.to_string()))?;
        let url = url.unwrap_or(&source.url);
        let destination = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.destination_for(source));

        let record = collect_source(&self.fetcher, source, url, &destination).await?;
        info!(
            path = %destination.display(),
            dates = record.dates.len(),
            "Saved record"
        );
        Ok(destination)
    }

    /// Collect every registered source in order. Failures are logged and
    /// skipped; returns the paths that were written.
    #[instrument(level = "info", skip_all)]
    pub async fn run_all(&self) -> Vec<PathBuf> {
        let written: Vec<PathBuf> = stream::iter(self.registry.iter())
            .then(|source| async move {
                match self.run_source(&source.id, None, None).await {
                    Ok(path) => {
                        debug!(id = %source.id, path = %path.display(), "Source collected");
                        Some(path)
                    }
                    Err(e) => {
                        error!(id = %source.id, error = %e, "Source failed");
                        None
                    }
                }
            })
            .filter_map(std::future::ready)
            .collect()
            .await;

        info!(
            total = self.registry.len(),
            written = written.len(),
            "Collected all sources"
        );
        written
    }

    /// Run the interactive menu until `q` or end of input.
    ///
    /// Only I/O errors on `input`/`output` end the loop early; run failures
    /// are printed and the menu is shown again.
    pub async fn run_menu<R, W>(&self, input: R, output: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let entries = menu_entries(&self.registry);
        let mut lines = input.lines();

        loop {
            output.write_all(render_menu(&entries).as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                debug!("Input closed; leaving menu");
                output.write_all(b"\n").await?;
                break;
            };

            match lookup(&entries, &line) {
                Some(Command::Collect(id)) => {
                    let label = self
                        .registry
                        .get(id)
                        .map(|s| s.label.as_str())
                        .unwrap_or(id.as_str());
                    output
                        .write_all(format!("Collecting from {label}...\n").as_bytes())
                        .await?;
                    match self.run_source(id, None, None).await {
                        Ok(path) => {
                            output
                                .write_all(format!("Saved to {}\n", path.display()).as_bytes())
                                .await?;
                        }
                        Err(e) => {
                            error!(%id, error = %e, "Menu run failed");
                            output.write_all(format!("Error: {e}\n").as_bytes()).await?;
                        }
                    }
                }
                Some(Command::Quit) => {
                    output.write_all(b"Exiting.\n").await?;
                    break;
                }
                None => {
                    warn!(input = %line.trim(), "Unknown menu choice");
                    output
                        .write_all(b"Invalid choice, please try again.\n")
                        .await?;
                }
            }
        }
        output.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{DIGEST_PAGE, RefusingFetcher, StaticFetcher};
    use tempfile::TempDir;

    fn shell<F: Fetch>(fetcher: F, dir: &TempDir) -> Shell<F> {
        Shell::new(fetcher, SourceRegistry::with_builtin().unwrap(), dir.path())
    }

    async fn drive<F: Fetch>(shell: &Shell<F>, input: &str) -> String {
        let mut output = Vec::new();
        shell.run_menu(input.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_menu_entries_follow_registry() {
        let registry = SourceRegistry::with_builtin().unwrap();
        let entries = menu_entries(&registry);

        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "2", "3", "q"]);
        assert_eq!(entries[1].command, Command::Collect("ntv".to_string()));
        assert_eq!(entries[3].command, Command::Quit);
    }

    #[test]
    fn test_lookup_trims_and_ignores_case() {
        let registry = SourceRegistry::with_builtin().unwrap();
        let entries = menu_entries(&registry);

        assert_eq!(
            lookup(&entries, " 3 \n"),
            Some(&Command::Collect("hurriyet".to_string()))
        );
        assert_eq!(lookup(&entries, "Q"), Some(&Command::Quit));
        assert_eq!(lookup(&entries, "4"), None);
        assert_eq!(lookup(&entries, ""), None);
    }

    #[test]
    fn test_render_menu() {
        let registry = SourceRegistry::with_builtin().unwrap();
        let menu = render_menu(&menu_entries(&registry));
        assert!(menu.contains("1 - Collect from The Hacker News\n"));
        assert!(menu.contains("q - Quit\n"));
        assert!(menu.ends_with("Choice: "));
    }

    #[test]
    fn test_render_listing() {
        let registry = SourceRegistry::with_builtin().unwrap();
        let listing = render_listing(&registry);
        assert_eq!(listing.lines().count(), 3);
        assert!(listing.starts_with("hackernews\tThe Hacker News\thttps://thehackernews.com/\thacker_news_data.txt\n"));
    }

    #[tokio::test]
    async fn test_menu_collects_then_quits() {
        let tmp = TempDir::new().unwrap();
        let shell = shell(StaticFetcher(DIGEST_PAGE), &tmp);

        let transcript = drive(&shell, "2\nq\n").await;

        let written = tmp.path().join("ntv_news_data.txt");
        assert!(transcript.contains("Collecting from NTV Haber..."));
        assert!(transcript.contains(&format!("Saved to {}", written.display())));
        assert!(transcript.ends_with("Exiting.\n"));
        assert_eq!(
            std::fs::read_to_string(written).unwrap(),
            "Title: News\nDescription: Daily digest\nDates:\nJan 1\n"
        );
    }

    #[tokio::test]
    async fn test_menu_rejects_unknown_choice() {
        let tmp = TempDir::new().unwrap();
        let shell = shell(StaticFetcher(DIGEST_PAGE), &tmp);

        let transcript = drive(&shell, "9\nq\n").await;

        assert!(transcript.contains("Invalid choice, please try again."));
        assert_eq!(transcript.matches("--- Page Digest ---").count(), 2);
        assert!(!tmp.path().join("hacker_news_data.txt").exists());
    }

    #[tokio::test]
    async fn test_menu_continues_after_failure() {
        let tmp = TempDir::new().unwrap();
        let shell = shell(RefusingFetcher, &tmp);

        let transcript = drive(&shell, "1\n3\nq\n").await;

        assert_eq!(transcript.matches("Error: fetch failed").count(), 2);
        assert!(transcript.ends_with("Exiting.\n"));
        assert!(!tmp.path().join("hacker_news_data.txt").exists());
    }

    #[tokio::test]
    async fn test_menu_ends_on_eof() {
        let tmp = TempDir::new().unwrap();
        let shell = shell(StaticFetcher(DIGEST_PAGE), &tmp);

        let transcript = drive(&shell, "").await;

        assert_eq!(transcript.matches("--- Page Digest ---").count(), 1);
        assert!(!transcript.contains("Exiting."));
    }

    #[tokio::test]
    async fn test_run_source_overrides() {
        let tmp = TempDir::new().unwrap();
        let shell = shell(StaticFetcher(DIGEST_PAGE), &tmp);
        let custom = tmp.path().join("custom.txt");

        let path = shell
            .run_source("hurriyet", Some("https://www.hurriyet.com.tr/gundem/"), Some(&custom))
            .await
            .unwrap();

        assert_eq!(path, custom);
        assert!(custom.exists());
        assert!(!tmp.path().join("hurriyet_data.txt").exists());
    }

    #[tokio::test]
    async fn test_run_source_unknown_id() {
        let tmp = TempDir::new().unwrap();
        let shell = shell(StaticFetcher(DIGEST_PAGE), &tmp);

        let err = shell.run_source("cnn", None, None).await.unwrap_err();
        assert!(matches!(err, RunError::UnknownSource(ref id) if id == "cnn"));
    }

    #[tokio::test]
    async fn test_run_all_writes_every_source() {
        let tmp = TempDir::new().unwrap();
        let shell = shell(StaticFetcher(DIGEST_PAGE), &tmp);

        let written = shell.run_all().await;

        assert_eq!(
            written,
            vec![
                tmp.path().join("hacker_news_data.txt"),
                tmp.path().join("ntv_news_data.txt"),
                tmp.path().join("hurriyet_data.txt"),
            ]
        );
    }

    #[tokio::test]
    async fn test_run_all_skips_failures() {
        let tmp = TempDir::new().unwrap();
        let shell = shell(RefusingFetcher, &tmp);

        assert!(shell.run_all().await.is_empty());
        assert_eq!(shell.registry().len(), 3);
    }
}
