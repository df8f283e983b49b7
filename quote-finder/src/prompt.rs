use std::io::{self, BufRead, Write};

use anyhow::Context;
use finder_core::{ExecutionMode, SearchRequest};
use thiserror::Error;

use crate::cli::Args;

#[derive(Debug, Error)]
pub(crate) enum PromptError {
    #[error("input closed while waiting for {what}")]
    Eof { what: &'static str },

    #[error("failed to read {what}")]
    Io {
        what: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("invalid {what}: {raw:?} (expected a positive number)")]
    NotPositive { what: &'static str, raw: String },

    #[error("invalid answer {raw:?}: expected 'y' or 'n'")]
    NotYesNo { raw: String },
}

/// Задаёт вопрос один раз и читает одну строку ответа.
/// Повторных попыток нет: неверный ответ - ошибка.
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str, what: &'static str) -> Result<String, PromptError> {
        let io_err = |source| PromptError::Io { what, source };

        writeln!(self.output, "{question}").map_err(io_err)?;
        self.output.flush().map_err(io_err)?;

        let mut line = String::new();
        let n = self.input.read_line(&mut line).map_err(io_err)?;
        if n == 0 {
            return Err(PromptError::Eof { what });
        }

        Ok(line.trim().to_string())
    }

    pub(crate) fn term(&mut self) -> Result<String, PromptError> {
        self.ask("What word are you looking for?", "search term")
    }

    pub(crate) fn positive(
        &mut self,
        question: &str,
        what: &'static str,
    ) -> Result<u32, PromptError> {
        let raw = self.ask(question, what)?;
        match raw.parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(PromptError::NotPositive { what, raw }),
        }
    }

    pub(crate) fn yes_no(&mut self, question: &str) -> Result<bool, PromptError> {
        let raw = self.ask(question, "y/n answer")?;
        match raw.to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            _ => Err(PromptError::NotYesNo { raw }),
        }
    }
}

/// Собирает запрос: что задано флагами - берём как есть, остальное спрашиваем.
pub(crate) fn fill_request<R: BufRead, W: Write>(
    args: &Args,
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<SearchRequest> {
    let term = match &args.term {
        Some(t) => t.clone(),
        None => prompter.term()?,
    };

    let pages = match args.pages {
        Some(n) => n,
        None => prompter.positive("Number of pages you want:", "page count")?,
    };

    let limit = match args.limit {
        Some(n) => n,
        None => prompter.positive("How many quotes you want per page:", "per-page limit")?,
    };

    let mode = match args.mode {
        Some(m) => ExecutionMode::from(m),
        None => {
            if prompter.yes_no("Should processing be performed in parallel? (y/n)")? {
                ExecutionMode::Concurrent
            } else {
                ExecutionMode::Sequential
            }
        }
    };

    SearchRequest::new(term, pages, limit, mode).context("invalid search request")
}
