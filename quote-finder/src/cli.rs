use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use finder_core::ExecutionMode;

use crate::config;
use crate::mock_source::MockConfig;

/// Quote Finder - ищет цитаты со словом на каждой странице источника
/// и печатает по одной цитате на страницу.
///
/// Параметры поиска, не заданные флагами, спрашиваются в stdin.
#[derive(Parser, Debug, Clone)]
#[command(name = "quote-finder", version, about)]
pub(crate) struct Args {
    /// Искомое слово или фраза (точное вхождение, с учётом регистра)
    #[arg(long)]
    pub(crate) term: Option<String>,

    /// Сколько страниц запросить
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) pages: Option<u32>,

    /// Сколько цитат на страницу
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) limit: Option<u32>,

    /// Режим: страница за страницей или все страницы параллельно
    #[arg(long, value_enum)]
    pub(crate) mode: Option<Mode>,

    /// Размер пула рабочих потоков в concurrent-режиме
    #[arg(long, default_value = config::DEFAULT_WORKERS)]
    pub(crate) workers: NonZeroUsize,

    /// Файл корпуса цитат (по одной на строку, `текст|автор`, поддержка # комментариев)
    #[arg(long)]
    pub(crate) quotes_file: Option<PathBuf>,

    /// Задержка mock-источника на каждую страницу, мс
    #[arg(long, default_value = config::DEFAULT_LATENCY_MS)]
    pub(crate) latency_ms: u64,

    /// Случайная добавка к задержке, мс (0..=jitter)
    #[arg(long, default_value = config::DEFAULT_JITTER_MS)]
    pub(crate) jitter_ms: u64,

    /// Страница, для которой источник "недоступен" (можно повторять)
    #[arg(long = "fail-page", value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) fail_pages: Vec<u32>,

    /// Страница, для которой источник отдаёт битый payload (можно повторять)
    #[arg(long = "corrupt-page", value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) corrupt_pages: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Mode {
    Sequential,
    Concurrent,
}

impl From<Mode> for ExecutionMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Sequential => ExecutionMode::Sequential,
            Mode::Concurrent => ExecutionMode::Concurrent,
        }
    }
}

impl Args {
    /// Валидация того, что clap проверить не может
    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(path) = &self.quotes_file {
            let md = std::fs::metadata(path)
                .with_context(|| format!("quotes file not found: {:?}", path))?;
            if !md.is_file() {
                bail!("--quotes-file must point to a file: {:?}", path);
            }
        }

        if let Some(page) = self
            .fail_pages
            .iter()
            .find(|p| self.corrupt_pages.contains(*p))
        {
            bail!("page {page} is listed in both --fail-page and --corrupt-page");
        }

        Ok(())
    }

    pub(crate) fn mock_config(&self) -> MockConfig {
        MockConfig {
            latency: Duration::from_millis(self.latency_ms),
            jitter: Duration::from_millis(self.jitter_ms),
            unavailable_pages: self.fail_pages.iter().copied().collect::<HashSet<_>>(),
            corrupt_pages: self.corrupt_pages.iter().copied().collect::<HashSet<_>>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn parses_full_command_line() {
        let args = Args::try_parse_from([
            "quote-finder",
            "--term",
            "love",
            "--pages",
            "3",
            "--limit",
            "5",
            "--mode",
            "concurrent",
            "--workers",
            "2",
            "--latency-ms",
            "0",
            "--fail-page",
            "2",
            "--fail-page",
            "3",
            "--corrupt-page",
            "1",
        ])
        .unwrap();

        assert_eq!(args.term.as_deref(), Some("love"));
        assert_eq!(args.pages, Some(3));
        assert_eq!(args.limit, Some(5));
        assert_eq!(args.mode, Some(Mode::Concurrent));
        assert_eq!(args.workers.get(), 2);
        args.validate().unwrap();

        let cfg = args.mock_config();
        assert_eq!(cfg.latency, Duration::ZERO);
        assert_eq!(cfg.jitter, Duration::from_millis(100));
        assert_eq!(cfg.unavailable_pages, HashSet::from([2, 3]));
        assert_eq!(cfg.corrupt_pages, HashSet::from([1]));
    }

    #[test]
    fn defaults_leave_search_params_unset() {
        let args = Args::try_parse_from(["quote-finder"]).unwrap();
        assert_eq!(args.term, None);
        assert_eq!(args.pages, None);
        assert_eq!(args.limit, None);
        assert_eq!(args.mode, None);
        assert_eq!(args.workers.get(), 4);
        assert!(args.fail_pages.is_empty());
    }

    #[test]
    fn zero_counts_are_rejected_by_clap() {
        assert!(Args::try_parse_from(["quote-finder", "--pages", "0"]).is_err());
        assert!(Args::try_parse_from(["quote-finder", "--limit", "0"]).is_err());
        assert!(Args::try_parse_from(["quote-finder", "--workers", "0"]).is_err());
        assert!(Args::try_parse_from(["quote-finder", "--fail-page", "0"]).is_err());
    }

    #[test]
    fn page_cannot_both_fail_and_be_corrupt() {
        let args = Args::try_parse_from([
            "quote-finder",
            "--fail-page",
            "2",
            "--corrupt-page",
            "2",
        ])
        .unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn quotes_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");

        let args = Args::try_parse_from([
            OsStr::new("quote-finder"),
            OsStr::new("--quotes-file"),
            missing.as_os_str(),
        ])
        .unwrap();
        assert!(args.validate().is_err());

        let args = Args::try_parse_from([
            OsStr::new("quote-finder"),
            OsStr::new("--quotes-file"),
            dir.path().as_os_str(),
        ])
        .unwrap();
        assert!(args.validate().is_err());
    }
}
