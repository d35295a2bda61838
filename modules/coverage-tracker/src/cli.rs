use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use coverage_core::{Recency, SafeSearch, SearchOptions};

use crate::render::OutputFormat;

/// Used when no query is given on the command line or in a file.
pub const DEFAULT_QUERY: &str =
    r#"("Action Network") ("new study" OR survey OR report OR findings) -site:actionnetwork.com"#;

/// The tracker's own domain; its pages are not coverage.
pub const DEFAULT_EXCLUDE: &str = "actionnetwork.org";

#[derive(Debug, Parser)]
#[command(
    name = "coverage-tracker",
    about = "Find press coverage through the Apify Google search actor"
)]
pub struct Cli {
    /// Search query; repeat for several
    #[arg(short = 'q', long = "query")]
    pub queries: Vec<String>,

    /// File with one query per line, or `-` for stdin
    #[arg(long)]
    pub queries_file: Option<PathBuf>,

    /// Result pages fetched per query
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=5))]
    pub max_pages: u32,

    /// Two-letter country code; pass an empty string for the actor default
    #[arg(long, default_value = "US")]
    pub country: String,

    /// Interface language code
    #[arg(long)]
    pub language: Option<String>,

    /// active or off
    #[arg(long)]
    pub safe_search: Option<SafeSearch>,

    /// any, 24h, 48h, 7d, 30d, 12mo or custom
    #[arg(long, default_value = "any")]
    pub recency: Recency,

    /// Start of a custom range (YYYY-MM-DD)
    #[arg(long)]
    pub after: Option<NaiveDate>,

    /// End of a custom range (YYYY-MM-DD)
    #[arg(long)]
    pub before: Option<NaiveDate>,

    /// Drop result URLs containing this text (case-insensitive)
    #[arg(long, default_value = DEFAULT_EXCLUDE)]
    pub exclude: String,

    /// Keep every URL, ignoring --exclude
    #[arg(long)]
    pub no_exclude: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Also print the first raw SERP page as JSON
    #[arg(long)]
    pub raw: bool,
}

impl Cli {
    /// Queries from `--query` followed by the queries file. Falls back to
    /// [`DEFAULT_QUERY`] when neither was given.
    pub fn load_queries(&self) -> Result<Vec<String>> {
        let mut queries = self.queries.clone();

        if let Some(path) = &self.queries_file {
            let text = if path.as_os_str() == "-" {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read queries from stdin")?;
                buf
            } else {
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read queries file {}", path.display()))?
            };
            queries.push(text);
        }

        if queries.is_empty() {
            queries.push(DEFAULT_QUERY.to_string());
        }
        Ok(queries)
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            max_pages_per_query: self.max_pages,
            country_code: Some(self.country.clone()),
            language_code: self.language.clone(),
            safe_search: self.safe_search,
            recency: self.recency,
            custom_start: self.after,
            custom_end: self.before,
        }
    }

    pub fn exclude_pattern(&self) -> Option<&str> {
        if self.no_exclude {
            None
        } else {
            Some(self.exclude.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("coverage-tracker").chain(args.iter().copied()))
            .unwrap_or_else(|e| panic!("parse failed: {e}"))
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.max_pages, 1);
        assert_eq!(cli.recency, Recency::AnyTime);
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.exclude_pattern(), Some(DEFAULT_EXCLUDE));
        assert_eq!(cli.load_queries().unwrap(), vec![DEFAULT_QUERY.to_string()]);

        let options = cli.search_options();
        assert_eq!(options.country_code.as_deref(), Some("US"));
        assert_eq!(options.safe_search, None);
    }

    #[test]
    fn page_count_is_bounded() {
        assert!(Cli::try_parse_from(["coverage-tracker", "--max-pages", "0"]).is_err());
        assert!(Cli::try_parse_from(["coverage-tracker", "--max-pages", "6"]).is_err());
        assert_eq!(parse(&["--max-pages", "5"]).max_pages, 5);
    }

    #[test]
    fn custom_range_arguments() {
        let cli = parse(&[
            "-q", "a", "-q", "b",
            "--recency", "custom",
            "--after", "2025-01-01",
            "--before", "2025-01-31",
            "--safe-search", "active",
        ]);
        let options = cli.search_options();
        assert_eq!(cli.load_queries().unwrap(), vec!["a", "b"]);
        assert_eq!(options.recency, Recency::Custom);
        assert_eq!(options.custom_start, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(options.custom_end, NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(options.safe_search, Some(SafeSearch::Active));
    }

    #[test]
    fn unknown_recency_is_rejected() {
        assert!(Cli::try_parse_from(["coverage-tracker", "--recency", "fortnight"]).is_err());
    }

    #[test]
    fn no_exclude_disables_pattern() {
        assert_eq!(parse(&["--no-exclude"]).exclude_pattern(), None);
        assert_eq!(parse(&["--exclude", "example.org"]).exclude_pattern(), Some("example.org"));
    }

    #[test]
    fn queries_file_is_appended() {
        let path = std::env::temp_dir().join(format!("coverage-queries-{}.txt", std::process::id()));
        std::fs::write(&path, "from file one\n\nfrom file two\n").unwrap();

        let cli = parse(&["-q", "inline", "--queries-file", path.to_str().unwrap()]);
        let queries = cli.load_queries().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0], "inline");
        assert!(queries[1].contains("from file two"));
    }

    #[test]
    fn missing_queries_file_is_an_error() {
        let cli = parse(&["--queries-file", "/nonexistent/coverage-queries.txt"]);
        assert!(cli.load_queries().is_err());
    }
}
