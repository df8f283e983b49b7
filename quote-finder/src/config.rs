use std::path::{Path, PathBuf};

use finder_core::QuoteRecord;
use thiserror::Error;

const DEFAULT_QUOTES: &str = include_str!("../assets/quotes.txt");

/// Размер пула в concurrent-режиме
pub(crate) const DEFAULT_WORKERS: &str = "4";

/// Имитация сетевой задержки mock-источника
pub(crate) const DEFAULT_LATENCY_MS: &str = "200";
pub(crate) const DEFAULT_JITTER_MS: &str = "100";

#[derive(Debug, Error)]
pub(crate) enum QuotesError {
    #[error("failed to read quotes file: {path:?}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("built-in quotes corpus is unreadable")]
    BuiltIn(#[source] std::io::Error),

    #[error("quotes corpus is empty (file: {path:?})")]
    EmptyFromFile { path: PathBuf },
}

/// Корпус для mock-источника:
/// - `--quotes-file` -> finder_core::corpus::read_quotes_from_path
/// - иначе встроенный `assets/quotes.txt`
pub(crate) fn load_quotes(path: Option<&Path>) -> Result<Vec<QuoteRecord>, QuotesError> {
    let Some(path) = path else {
        return finder_core::corpus::read_quotes(DEFAULT_QUOTES.as_bytes())
            .map_err(QuotesError::BuiltIn);
    };

    let quotes = finder_core::corpus::read_quotes_from_path(path).map_err(|e| {
        QuotesError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    if quotes.is_empty() {
        return Err(QuotesError::EmptyFromFile {
            path: path.to_path_buf(),
        });
    }

    Ok(quotes)
}
