use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use crossbeam_channel::{Receiver, Sender};
use finder_core::{QuoteSource, Reporter, SearchRequest};
use log::{debug, info, warn};

use super::{PageOutcome, RunSummary, process_page_guarded};

/// Все страницы сразу, пул из `min(workers, N)` потоков.
///
/// - номера страниц кладутся в очередь заранее
/// - каждый рабочий поток берёт страницу из очереди и сам отчитывается по ней
/// - порядок отчётов между страницами не гарантируется
/// - паника на странице не убивает поток: страница отчитывается как проваленная
///
/// Возвращается только когда все страницы отработаны и все потоки завершены.
pub(crate) fn run_concurrent(
    req: &SearchRequest,
    workers: NonZeroUsize,
    source: Arc<dyn QuoteSource>,
    reporter: Arc<dyn Reporter>,
) -> anyhow::Result<RunSummary> {
    let started = Instant::now();

    let (job_tx, job_rx) = crossbeam_channel::unbounded::<u32>();
    for page in req.pages() {
        job_tx.send(page).context("queue page for workers")?;
    }
    // очередь закрыта: потоки выходят, когда она опустеет
    drop(job_tx);

    let (done_tx, done_rx) = crossbeam_channel::unbounded::<PageOutcome>();

    let pool_size = workers.get().min(req.page_count() as usize);
    let req_shared = Arc::new(req.clone());
    let mut handles = Vec::with_capacity(pool_size);

    for id in 0..pool_size {
        let jobs = job_rx.clone();
        let done = done_tx.clone();
        let req = req_shared.clone();
        let source = source.clone();
        let reporter = reporter.clone();

        let spawned = thread::Builder::new()
            .name(format!("page-worker-{id}"))
            .spawn(move || run_worker(&req, jobs, done, source.as_ref(), reporter.as_ref()));

        match spawned {
            Ok(h) => handles.push(h),
            Err(e) if handles.is_empty() => {
                return Err(e).context("spawn page worker");
            }
            Err(e) => {
                // очередь общая: оставшиеся потоки доделают все страницы
                warn!(
                    "failed to spawn page-worker-{id}: {e}; continuing with {} workers",
                    handles.len()
                );
                break;
            }
        }
    }
    drop(job_rx);
    drop(done_tx);

    debug!("concurrent run: {} pages, {} workers", req.page_count(), handles.len());

    let mut summary = RunSummary::new(req.page_count());
    // канал закроется, когда все потоки отпустят свои Sender
    for outcome in done_rx.iter() {
        summary.record(outcome);
    }

    for h in handles {
        if let Err(panic) = h.join() {
            warn!("page worker panicked: {:?}", panic);
        }
    }
    summary.fail_unaccounted();

    summary.elapsed = started.elapsed();
    info!("concurrent run done: {summary}");
    Ok(summary)
}

fn run_worker(
    req: &SearchRequest,
    jobs: Receiver<u32>,
    done: Sender<PageOutcome>,
    source: &dyn QuoteSource,
    reporter: &dyn Reporter,
) {
    for page in jobs.iter() {
        let outcome = process_page_guarded(page, req, source, reporter);
        if done.send(outcome).is_err() {
            // сборщик ушёл, дальше считать некому
            break;
        }
    }
}
