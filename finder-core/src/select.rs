use crate::types::{MatchResult, Page, QuoteRecord};

/// Фильтрует страницу по `term` и выбирает одну цитату для отчёта.
///
/// Правило выбора:
/// - остаются цитаты, в тексте которых есть `term` (точное вхождение, с учётом регистра)
/// - оставшиеся стабильно сортируются по длине по убыванию
/// - берётся последняя
///
/// То есть выигрывает самая короткая, а среди одинаково коротких -
/// та, что стоит на странице позже.
///
/// Длина считается в UTF-16 code units: символ вне BMP (эмодзи) весит 2.
pub fn select(page: Page, term: &str) -> MatchResult {
    let mut matches: Vec<QuoteRecord> = page
        .records
        .into_iter()
        .filter(|q| q.text.contains(term))
        .collect();

    // sort_by стабильный: равные по длине остаются в исходном порядке
    matches.sort_by(|a, b| text_len(&b.text).cmp(&text_len(&a.text)));

    MatchResult {
        page_number: page.number,
        selected_text: matches.pop().map(|q| q.text),
    }
}

fn text_len(s: &str) -> usize {
    s.encode_utf16().count()
}
