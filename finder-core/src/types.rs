use std::fmt;

use crate::error::RequestError;

/// Одна цитата. Для поиска важен только `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    /// Текст цитаты, по нему идёт поиск
    pub text: String,
    /// Автор, если известен. В отчёт не попадает
    pub author: Option<String>,
}

impl QuoteRecord {
    /// Цитата без автора
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: None,
        }
    }

    /// Цитата с автором
    pub fn with_author(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: Some(author.into()),
        }
    }
}

/// Страница цитат в исходном порядке + номер страницы, которая её породила.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Номер страницы, с 1
    pub number: u32,
    /// Цитаты в порядке источника
    pub records: Vec<QuoteRecord>,
}

/// Режим выполнения прогона
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Страница за страницей, строго по порядку
    Sequential,
    /// Все страницы сразу, порядок отчётов не гарантируется
    Concurrent,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => f.write_str("sequential"),
            Self::Concurrent => f.write_str("concurrent"),
        }
    }
}

/// Параметры одного прогона. Собираются один раз до старта пайплайна.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    term: String,
    page_count: u32,
    per_page_limit: u32,
    mode: ExecutionMode,
}

impl SearchRequest {
    /// Проверяет параметры: непустой `term`, `page_count > 0`, `per_page_limit > 0`.
    ///
    /// `term` сохраняется как есть, без trim.
    pub fn new(
        term: impl Into<String>,
        page_count: u32,
        per_page_limit: u32,
        mode: ExecutionMode,
    ) -> Result<Self, RequestError> {
        let term = term.into();
        if term.is_empty() {
            return Err(RequestError::EmptyTerm);
        }
        if page_count == 0 {
            return Err(RequestError::ZeroPages);
        }
        if per_page_limit == 0 {
            return Err(RequestError::ZeroLimit);
        }

        Ok(Self {
            term,
            page_count,
            per_page_limit,
            mode,
        })
    }

    /// Искомая подстрока
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Сколько страниц запросить
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Сколько цитат на страницу
    pub fn per_page_limit(&self) -> u32 {
        self.per_page_limit
    }

    /// Режим прогона
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Номера страниц прогона: `1..=page_count`
    pub fn pages(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.page_count
    }
}

/// Результат фильтрации одной страницы.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Страница, к которой относится результат
    pub page_number: u32,
    /// Выбранная цитата или `None`, если совпадений нет
    pub selected_text: Option<String>,
}

impl MatchResult {
    /// Есть ли выбранная цитата
    pub fn found(&self) -> bool {
        self.selected_text.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_request_rejects_empty_term_and_zero_counts() {
        assert_eq!(
            SearchRequest::new("", 1, 1, ExecutionMode::Sequential).unwrap_err(),
            RequestError::EmptyTerm
        );
        assert_eq!(
            SearchRequest::new("love", 0, 1, ExecutionMode::Sequential).unwrap_err(),
            RequestError::ZeroPages
        );
        assert_eq!(
            SearchRequest::new("love", 1, 0, ExecutionMode::Concurrent).unwrap_err(),
            RequestError::ZeroLimit
        );
    }

    #[test]
    fn search_request_keeps_term_verbatim() {
        // без trim и без нормализации регистра
        let req = SearchRequest::new(" Love ", 3, 5, ExecutionMode::Concurrent).unwrap();
        assert_eq!(req.term(), " Love ");
        assert_eq!(req.pages().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(req.per_page_limit(), 5);
        assert_eq!(req.mode(), ExecutionMode::Concurrent);
    }
}
