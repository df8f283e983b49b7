//! Точка входа `quote-finder`.
//!
//! Жизненный цикл:
//! - парсинг CLI и загрузка корпуса цитат для mock-источника
//! - недостающие параметры поиска спрашиваются в stdin (один раз)
//! - прогон по страницам: последовательно или пулом потоков
//! - печать итога и времени прогона

mod cli;
mod config;
mod mock_source;
mod prompt;
mod reporter;
mod runner;

use std::io;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use finder_core::{QuoteSource, Reporter};
use log::info;

use crate::mock_source::MockQuoteSource;
use crate::prompt::Prompter;
use crate::reporter::ConsoleReporter;

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/debug
    env_logger::init();

    let args = cli::Args::parse();
    args.validate()?;

    let quotes = config::load_quotes(args.quotes_file.as_deref()).context("load quotes corpus")?;

    // вопросы в stderr, чтобы stdout оставался чистым списком результатов
    let request = {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stderr());
        prompt::fill_request(&args, &mut prompter)?
    };

    info!(
        "Starting quote-finder: term={:?}, pages={}, limit={}, mode={}, workers={}, corpus={} quotes",
        request.term(),
        request.page_count(),
        request.per_page_limit(),
        request.mode(),
        args.workers,
        quotes.len()
    );

    let source: Arc<dyn QuoteSource> = Arc::new(MockQuoteSource::new(quotes, args.mock_config()));
    let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter::stdout());

    let summary = runner::run(&request, args.workers, source, reporter)?;

    println!(
        "finished in {} ms: {summary}",
        summary.elapsed.as_millis()
    );

    Ok(())
}
