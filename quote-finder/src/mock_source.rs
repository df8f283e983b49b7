use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use finder_core::source::check_fetch_args;
use finder_core::wire::encode_page;
use finder_core::{Page, QuoteRecord, QuoteSource, SourceError};
use log::debug;
use rand::Rng;

/// Ответ "сервера" для страниц из `corrupt_pages`: валидный JSON без `data`
const CORRUPT_PAYLOAD: &[u8] = br#"{"statusCode":500,"message":"Internal Server Error"}"#;

#[derive(Debug, Clone, Default)]
pub(crate) struct MockConfig {
    /// Базовая задержка на каждую страницу
    pub(crate) latency: Duration,
    /// Случайная добавка к задержке: 0..=jitter
    pub(crate) jitter: Duration,
    /// Страницы, на которых источник "лежит"
    pub(crate) unavailable_pages: HashSet<u32>,
    /// Страницы, на которых источник отдаёт мусор
    pub(crate) corrupt_pages: HashSet<u32>,
}

/// Источник, который нарезает корпус цитат на страницы.
///
/// Страница `n` при лимите `l` - это цитаты `[(n-1)*l, n*l)`;
/// за концом корпуса страницы пустые.
pub(crate) struct MockQuoteSource {
    quotes: Vec<QuoteRecord>,
    cfg: MockConfig,
}

impl MockQuoteSource {
    pub(crate) fn new(quotes: Vec<QuoteRecord>, cfg: MockConfig) -> Self {
        Self { quotes, cfg }
    }

    fn page_records(&self, page: u32, limit: u32) -> &[QuoteRecord] {
        let limit = limit as usize;
        let start = (page as usize - 1).saturating_mul(limit);
        if start >= self.quotes.len() {
            return &[];
        }
        let end = start.saturating_add(limit).min(self.quotes.len());
        &self.quotes[start..end]
    }

    fn simulate_latency(&self) {
        let mut delay = self.cfg.latency;
        if !self.cfg.jitter.is_zero() {
            let k: f64 = rand::rng().random_range(0.0..=1.0);
            delay += self.cfg.jitter.mul_f64(k);
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

impl QuoteSource for MockQuoteSource {
    fn fetch(&self, page: u32, limit: u32) -> Result<Vec<u8>, SourceError> {
        check_fetch_args(page, limit)?;

        self.simulate_latency();

        if self.cfg.unavailable_pages.contains(&page) {
            return Err(SourceError::Unavailable {
                page,
                reason: "simulated outage".to_string(),
            });
        }
        if self.cfg.corrupt_pages.contains(&page) {
            return Ok(CORRUPT_PAYLOAD.to_vec());
        }

        let records = self.page_records(page, limit).to_vec();
        debug!("mock source: page {page} -> {} quotes", records.len());

        let total = self.quotes.len();
        let total_pages = total.div_ceil(limit as usize);

        encode_page(
            &Page {
                number: page,
                records,
            },
            u32::try_from(total).unwrap_or(u32::MAX),
            u32::try_from(total_pages).unwrap_or(u32::MAX),
        )
        .map_err(|e| SourceError::Unavailable {
            page,
            reason: e.to_string(),
        })
    }
}
