//! # finder-core
//!
//! Базовые типы и чистая логика поиска цитат по страницам.
//!
//! Этот крейт содержит:
//!
//! - [`types`] — доменные типы (цитата, страница, запрос, результат)
//! - [`wire`] — JSON-формат страницы: декодер и кодер
//! - [`select`] — фильтрация страницы и выбор одной цитаты
//! - [`source`] — контракт источника страниц
//! - [`report`] — контракт получателя результатов
//! - [`corpus`] — чтение корпуса цитат из текста/файла
//! - [`error`] — типы ошибок
//!
//! ## Пример: страница -> результат
//!
//! ```rust
//! use finder_core::wire::decode_page;
//! use finder_core::select::select;
//!
//! let raw = br#"{"data":[
//!     {"quoteText":"I love code"},
//!     {"quoteText":"love is all"},
//!     {"quoteText":"no match here"}
//! ]}"#;
//!
//! let page = decode_page(1, raw).unwrap();
//! let res = select(page, "love");
//! assert!(res.found());
//! assert_eq!(res.selected_text.as_deref(), Some("love is all"));
//! ```
//!
//! ## Пример: запрос
//!
//! ```rust
//! use finder_core::{ExecutionMode, RequestError, SearchRequest};
//!
//! let req = SearchRequest::new("love", 2, 3, ExecutionMode::Sequential).unwrap();
//! assert_eq!(req.pages().collect::<Vec<_>>(), vec![1, 2]);
//!
//! let err = SearchRequest::new("", 2, 3, ExecutionMode::Sequential).unwrap_err();
//! assert_eq!(err, RequestError::EmptyTerm);
//! ```
//!
//! ## Дизайн
//!
//! Здесь нет потоков, сети и вывода в консоль: только типы, разбор и выбор.
//! Раннеры, mock-источник и консольный репортер живут в бинарнике `quote-finder`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Доменные типы.
pub mod types;

/// JSON payload страницы.
pub mod wire;

/// Фильтр и выбор цитаты.
pub mod select;

/// Контракт источника.
pub mod source;

/// Контракт репортера.
pub mod report;

/// Корпус цитат.
pub mod corpus;

/// Ошибки `finder-core`.
pub mod error;

// --- Re-exports ---

pub use crate::error::{DecodeError, PageError, RequestError, SourceError};
pub use crate::report::Reporter;
pub use crate::source::QuoteSource;
pub use crate::types::{ExecutionMode, MatchResult, Page, QuoteRecord, SearchRequest};
