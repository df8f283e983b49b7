use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::types::{Page, QuoteRecord};

/// Ответ источника на запрос одной страницы.
///
/// Декодеру нужен только `data`, остальные поля необязательны.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotesPayload {
    /// HTTP-подобный код ответа
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Текстовый статус
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Где эта страница в корпусе
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    /// Размер всего корпуса
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_quotes: Option<u32>,
    /// Цитаты страницы. Отсутствие или `null` - битый payload
    #[serde(default)]
    pub data: Option<Vec<WireQuote>>,
}

/// Положение страницы в корпусе
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Номер этой страницы
    pub current_page: u32,
    /// Следующая страница, `None` на последней
    pub next_page: Option<u32>,
    /// Всего страниц при текущем лимите
    pub total_pages: u32,
}

/// Цитата в payload. Лишние поля (`_id`, `quoteGenre`) игнорируются
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireQuote {
    /// `quoteText`
    #[serde(rename = "quoteText")]
    pub text: String,
    /// `quoteAuthor`
    #[serde(rename = "quoteAuthor", default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Кодирует страницу в JSON payload
pub fn encode_page(
    page: &Page,
    total_quotes: u32,
    total_pages: u32,
) -> Result<Vec<u8>, serde_json::Error> {
    let next_page = (page.number < total_pages).then(|| page.number + 1);

    let payload = QuotesPayload {
        status_code: Some(200),
        message: Some("Quotes".to_string()),
        pagination: Some(Pagination {
            current_page: page.number,
            next_page,
            total_pages,
        }),
        total_quotes: Some(total_quotes),
        data: Some(
            page.records
                .iter()
                .map(|r| WireQuote {
                    text: r.text.clone(),
                    author: r.author.clone(),
                })
                .collect(),
        ),
    };

    serde_json::to_vec(&payload)
}

/// Разбирает payload в страницу с номером `page`.
///
/// Номер страницы берётся у вызывающего, а не из `pagination`:
/// страница всегда помечена тем запросом, который её породил.
pub fn decode_page(page: u32, payload: &[u8]) -> Result<Page, DecodeError> {
    let parsed: QuotesPayload = serde_json::from_slice(payload)?;
    let data = parsed.data.ok_or(DecodeError::MissingData)?;

    let records = data
        .into_iter()
        .map(|q| QuoteRecord {
            text: q.text,
            author: q.author,
        })
        .collect();

    Ok(Page {
        number: page,
        records,
    })
}
