use thiserror::Error;

/// Ошибка обработки одной страницы.
///
/// Никогда не валит весь прогон: раннер ловит её на границе страницы
/// и отдаёт репортеру.
#[derive(Debug, Error)]
pub enum PageError {
    /// Источник не смог отдать страницу
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Страница пришла, но не разбирается
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Обработка страницы запаниковала (например, в репортере)
    #[error("page processing panicked: {0}")]
    Panicked(String),
}

/// Ошибки источника котировок
#[derive(Debug, Error)]
pub enum SourceError {
    /// Номер страницы начинается с 1
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// Лимит на страницу должен быть > 0
    #[error("invalid per-page limit: {0}")]
    InvalidLimit(u32),

    /// Источник недоступен
    #[error("source unavailable for page {page}: {reason}")]
    Unavailable {
        /// Запрошенная страница
        page: u32,
        /// Причина от источника
        reason: String,
    },
}

/// Ошибки разбора payload страницы
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Поле `data` отсутствует или равно null
    #[error("malformed payload: missing quote data")]
    MissingData,

    /// Невалидный JSON или не та структура
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ошибки построения запроса на поиск
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// Пустая строка поиска
    #[error("search term is empty")]
    EmptyTerm,

    /// Количество страниц должно быть > 0
    #[error("page count must be positive")]
    ZeroPages,

    /// Лимит на страницу должен быть > 0
    #[error("per-page limit must be positive")]
    ZeroLimit,
}
