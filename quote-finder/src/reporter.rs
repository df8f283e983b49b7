use std::io::{self, Write};
use std::sync::Mutex;

use finder_core::{MatchResult, PageError, Reporter};
use log::warn;

/// Печатает по одной строке на страницу.
///
/// Строка пишется целиком под мьютексом, поэтому отчёты из разных
/// рабочих потоков не перемешиваются посимвольно.
pub(crate) struct ConsoleReporter<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleReporter<io::Stdout> {
    pub(crate) fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn write_line(&self, line: &str) {
        let mut out = match self.out.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            warn!("failed to write report: {e}");
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn report(&self, result: MatchResult, term: &str) {
        let line = match result.selected_text {
            Some(text) => format!("page {}: {}", result.page_number, text),
            None => format!("page {}: no quote with {:?} found", result.page_number, term),
        };
        self.write_line(&line);
    }

    fn report_failure(&self, page: u32, error: &PageError) {
        self.write_line(&format!("page {page}: failed: {error}"));
    }
}
