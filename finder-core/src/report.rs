use crate::error::PageError;
use crate::types::MatchResult;

/// Получатель результатов по страницам.
///
/// В concurrent-режиме вызывается из нескольких потоков одновременно:
/// один вызов должен давать цельный вывод, порядок между страницами не важен.
pub trait Reporter: Send + Sync {
    /// Результат фильтрации страницы (найдено / не найдено)
    fn report(&self, result: MatchResult, term: &str);

    /// Страницу не удалось получить или разобрать
    fn report_failure(&self, page: u32, error: &PageError);
}
