//! Прогон пайплайна `fetch -> decode -> select -> report` по страницам.
//!
//! Два режима:
//! - [`sequential`] — страницы строго по порядку в текущем потоке
//! - [`concurrent`] — очередь страниц + пул рабочих потоков фиксированного размера
//!
//! Ошибки страницы ловятся в [`process_page`] и уходят в репортер:
//! до раннера они не доходят, прогон всегда проходит все страницы.
//! Паника на странице ловится в [`process_page_guarded`] и считается
//! ошибкой этой страницы.

pub(crate) mod concurrent;
pub(crate) mod sequential;

use std::any::Any;
use std::fmt;
use std::num::NonZeroUsize;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use finder_core::select::select;
use finder_core::wire::decode_page;
use finder_core::{ExecutionMode, Page, PageError, QuoteSource, Reporter, SearchRequest};
use log::{debug, warn};

/// Чем закончилась страница. Нужен только для итоговой статистики.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageOutcome {
    Found,
    NotFound,
    Failed,
}

/// Итог прогона
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub(crate) pages: u32,
    pub(crate) found: u32,
    pub(crate) not_found: u32,
    pub(crate) failed: u32,
    pub(crate) elapsed: Duration,
}

impl RunSummary {
    fn new(pages: u32) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    fn record(&mut self, outcome: PageOutcome) {
        match outcome {
            PageOutcome::Found => self.found += 1,
            PageOutcome::NotFound => self.not_found += 1,
            PageOutcome::Failed => self.failed += 1,
        }
    }

    /// Страницы без результата (например, упал рабочий поток) считаем проваленными
    fn fail_unaccounted(&mut self) {
        let seen = self.found + self.not_found + self.failed;
        self.failed += self.pages.saturating_sub(seen);
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pages={} found={} not_found={} failed={}",
            self.pages, self.found, self.not_found, self.failed
        )
    }
}

/// Запускает прогон в режиме из `req`.
///
/// `workers` используется только в concurrent-режиме.
pub(crate) fn run(
    req: &SearchRequest,
    workers: NonZeroUsize,
    source: Arc<dyn QuoteSource>,
    reporter: Arc<dyn Reporter>,
) -> anyhow::Result<RunSummary> {
    match req.mode() {
        ExecutionMode::Sequential => Ok(sequential::run_sequential(
            req,
            source.as_ref(),
            reporter.as_ref(),
        )),
        ExecutionMode::Concurrent => concurrent::run_concurrent(req, workers, source, reporter),
    }
}

/// Одна страница целиком: получить, разобрать, отфильтровать, отдать репортеру.
pub(crate) fn process_page(
    page: u32,
    req: &SearchRequest,
    source: &dyn QuoteSource,
    reporter: &dyn Reporter,
) -> PageOutcome {
    debug!(
        "page {page} on thread {}",
        thread::current().name().unwrap_or("<unnamed>")
    );

    match fetch_page(page, req.per_page_limit(), source) {
        Ok(p) => {
            let result = select(p, req.term());
            let outcome = if result.found() {
                PageOutcome::Found
            } else {
                PageOutcome::NotFound
            };
            reporter.report(result, req.term());
            outcome
        }
        Err(e) => {
            warn!("page {page} failed: {e}");
            reporter.report_failure(page, &e);
            PageOutcome::Failed
        }
    }
}

/// [`process_page`], но паника не выходит за границу страницы:
/// страница отчитывается как проваленная, поток живёт дальше.
pub(crate) fn process_page_guarded(
    page: u32,
    req: &SearchRequest,
    source: &dyn QuoteSource,
    reporter: &dyn Reporter,
) -> PageOutcome {
    match catch_unwind(AssertUnwindSafe(|| process_page(page, req, source, reporter))) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let err = PageError::Panicked(panic_message(payload.as_ref()));
            warn!("page {page} failed: {err}");
            // репортер мог запаниковать сам, второй раз не роняем поток
            if let Err(e) = catch_unwind(AssertUnwindSafe(|| reporter.report_failure(page, &err))) {
                warn!("reporter panicked on failure of page {page}: {:?}", e);
            }
            PageOutcome::Failed
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn fetch_page(page: u32, limit: u32, source: &dyn QuoteSource) -> Result<Page, PageError> {
    let payload = source.fetch(page, limit)?;
    Ok(decode_page(page, &payload)?)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Источник и репортер для тестов раннеров.

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    use finder_core::wire::encode_page;
    use finder_core::{MatchResult, Page, PageError, QuoteRecord, QuoteSource, Reporter, SourceError};

    /// Что источник отдаёт на конкретную страницу
    #[derive(Debug, Clone)]
    pub(crate) enum Scripted {
        Quotes(Vec<&'static str>),
        Unavailable,
        Garbage,
    }

    /// Источник с заранее заданными страницами.
    /// Пишет номера запрошенных страниц и считает одновременные fetch.
    pub(crate) struct ScriptedSource {
        pages: HashMap<u32, Scripted>,
        delay: Duration,
        calls: Mutex<Vec<u32>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl ScriptedSource {
        pub(crate) fn new(pages: impl IntoIterator<Item = (u32, Scripted)>) -> Self {
            Self {
                pages: pages.into_iter().collect(),
                delay: Duration::ZERO,
                calls: Mutex::new(Vec::new()),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }

        /// `n` одинаковых страниц с одной подходящей цитатой
        pub(crate) fn uniform(n: u32) -> Self {
            Self::new((1..=n).map(|p| (p, Scripted::Quotes(vec!["a love", "none"]))))
        }

        pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub(crate) fn calls(&self) -> Vec<u32> {
            self.calls.lock().unwrap().clone()
        }

        pub(crate) fn max_in_flight(&self) -> usize {
            self.max_in_flight.load(Ordering::SeqCst)
        }
    }

    impl QuoteSource for ScriptedSource {
        fn fetch(&self, page: u32, _limit: u32) -> Result<Vec<u8>, SourceError> {
            self.calls.lock().unwrap().push(page);

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match self.pages.get(&page) {
                Some(Scripted::Quotes(texts)) => {
                    let p = Page {
                        number: page,
                        records: texts.iter().map(|t| QuoteRecord::new(*t)).collect(),
                    };
                    Ok(encode_page(&p, 0, 0).unwrap())
                }
                Some(Scripted::Garbage) => Ok(b"<html>502 Bad Gateway</html>".to_vec()),
                Some(Scripted::Unavailable) | None => Err(SourceError::Unavailable {
                    page,
                    reason: "scripted".to_string(),
                }),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Event {
        Report(MatchResult),
        Failure(u32),
    }

    impl Event {
        pub(crate) fn page(&self) -> u32 {
            match self {
                Event::Report(r) => r.page_number,
                Event::Failure(p) => *p,
            }
        }
    }

    #[derive(Default)]
    pub(crate) struct RecordingReporter {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingReporter {
        pub(crate) fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        /// События, упорядоченные по номеру страницы
        pub(crate) fn events_by_page(&self) -> Vec<Event> {
            let mut ev = self.events();
            ev.sort_by_key(Event::page);
            ev
        }
    }

    impl Reporter for RecordingReporter {
        fn report(&self, result: MatchResult, _term: &str) {
            self.events.lock().unwrap().push(Event::Report(result));
        }

        fn report_failure(&self, page: u32, _error: &PageError) {
            self.events.lock().unwrap().push(Event::Failure(page));
        }
    }

    pub(crate) fn found(page: u32, text: &str) -> Event {
        Event::Report(MatchResult {
            page_number: page,
            selected_text: Some(text.to_string()),
        })
    }

    pub(crate) fn not_found(page: u32) -> Event {
        Event::Report(MatchResult {
            page_number: page,
            selected_text: None,
        })
    }
}
