use std::time::Instant;

use finder_core::{QuoteSource, Reporter, SearchRequest};
use log::info;

use super::{RunSummary, process_page_guarded};

/// Страницы `1..=N` по очереди в текущем потоке.
///
/// Следующая страница запрашивается только после отчёта по предыдущей;
/// ошибка страницы не останавливает прогон.
pub(crate) fn run_sequential(
    req: &SearchRequest,
    source: &dyn QuoteSource,
    reporter: &dyn Reporter,
) -> RunSummary {
    let started = Instant::now();
    let mut summary = RunSummary::new(req.page_count());

    for page in req.pages() {
        summary.record(process_page_guarded(page, req, source, reporter));
    }

    summary.elapsed = started.elapsed();
    info!("sequential run done: {summary}");
    summary
}
