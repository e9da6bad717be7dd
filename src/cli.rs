//! Command-line interface definitions for page_digest.
//!
//! Without `--source`, `--all` or `--list` the tool starts the interactive
//! menu. Client settings can also come from environment variables or the YAML
//! config file; flags win over both.

use clap::Parser;

/// Command-line arguments for page_digest.
///
/// # Examples
///
/// ```sh
/// # Interactive menu
/// page_digest
///
/// # One source, default output file
/// page_digest --source ntv
///
/// # One source, custom page and destination
/// page_digest -s hurriyet --url https://www.hurriyet.com.tr/gundem/ -o gundem.txt
///
/// # Every registered source into ./digests
/// page_digest --all --output-dir ./digests
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Source id to collect once and exit
    #[arg(short, long, conflicts_with_all = ["all", "list"])]
    pub source: Option<String>,

    /// Page to fetch instead of the source's default URL (requires --source)
    #[arg(short, long, requires = "source")]
    pub url: Option<String>,

    /// Destination file instead of the source's default (requires --source)
    #[arg(short, long, requires = "source")]
    pub output: Option<String>,

    /// Collect every registered source, one after another
    #[arg(short, long, conflicts_with = "list")]
    pub all: bool,

    /// Print the registered sources and exit
    #[arg(short, long)]
    pub list: bool,

    /// Directory default output files are written into
    #[arg(short = 'd', long, env = "PAGE_DIGEST_OUTPUT_DIR")]
    pub output_dir: Option<String>,

    /// Optional path to a YAML config file with extra sources
    #[arg(short, long, env = "PAGE_DIGEST_CONFIG")]
    pub config: Option<String>,

    /// User-Agent header sent with every request
    #[arg(long, env = "PAGE_DIGEST_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Overall request timeout in seconds
    #[arg(long, env = "PAGE_DIGEST_TIMEOUT_SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_menu() {
        let cli = Cli::parse_from(["page_digest"]);
        assert!(cli.source.is_none());
        assert!(!cli.all);
        assert!(!cli.list);
    }

    #[test]
    fn test_cli_single_source() {
        let cli = Cli::parse_from([
            "page_digest",
            "--source",
            "ntv",
            "--url",
            "https://www.ntv.com.tr/gundem",
            "--output",
            "gundem.txt",
        ]);

        assert_eq!(cli.source.as_deref(), Some("ntv"));
        assert_eq!(cli.url.as_deref(), Some("https://www.ntv.com.tr/gundem"));
        assert_eq!(cli.output.as_deref(), Some("gundem.txt"));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["page_digest", "-a", "-d", "/tmp/digests", "--timeout-secs", "5"]);

        assert!(cli.all);
        assert_eq!(cli.output_dir.as_deref(), Some("/tmp/digests"));
        assert_eq!(cli.timeout_secs, Some(5));
    }

    #[test]
    fn test_cli_rejects_zero_timeout() {
        assert!(Cli::try_parse_from(["page_digest", "--timeout-secs", "0"]).is_err());
    }

    #[test]
    fn test_cli_url_requires_source() {
        assert!(Cli::try_parse_from(["page_digest", "--url", "https://example.com/"]).is_err());
    }

    #[test]
    fn test_cli_source_conflicts_with_all() {
        assert!(Cli::try_parse_from(["page_digest", "-s", "ntv", "--all"]).is_err());
    }
}
