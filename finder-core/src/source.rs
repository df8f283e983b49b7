use crate::error::SourceError;

/// Источник страниц с цитатами.
///
/// Вызывается из рабочих потоков, поэтому `Send + Sync`.
/// Единственная точка, где страница может "висеть" (I/O).
pub trait QuoteSource: Send + Sync {
    /// Сырой payload страницы `page` (с 1) не больше чем на `limit` цитат
    fn fetch(&self, page: u32, limit: u32) -> Result<Vec<u8>, SourceError>;
}

/// Проверка аргументов `fetch`: page >= 1, limit >= 1
pub fn check_fetch_args(page: u32, limit: u32) -> Result<(), SourceError> {
    if page == 0 {
        return Err(SourceError::InvalidPage(page));
    }
    if limit == 0 {
        return Err(SourceError::InvalidLimit(limit));
    }
    Ok(())
}
