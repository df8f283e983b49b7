use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::types::QuoteRecord;

/// Чтение корпуса цитат.
///
/// Формат строки: `текст цитаты|автор` (автор необязателен).
/// Пустые строки и строки, начинающиеся с `#`, пропускаются.
/// Порядок сохраняется, дубликаты не убираются.
pub fn read_quotes<R: io::Read>(reader: R) -> io::Result<Vec<QuoteRecord>> {
    let mut out = Vec::new();
    let buf = BufReader::new(reader);

    for line in buf.lines() {
        let line = line?;
        if let Some(q) = parse_line(&line) {
            out.push(q);
        }
    }

    Ok(out)
}

/// Чтение корпуса из файла
pub fn read_quotes_from_path(path: impl AsRef<Path>) -> io::Result<Vec<QuoteRecord>> {
    let f = File::open(path)?;
    read_quotes(f)
}

fn parse_line(line: &str) -> Option<QuoteRecord> {
    let s = line.trim();
    if s.is_empty() || s.starts_with('#') {
        return None;
    }

    // автор - после последнего '|'
    match s.rsplit_once('|') {
        Some((text, author)) => {
            let text = text.trim();
            let author = author.trim();
            if text.is_empty() {
                return None;
            }
            if author.is_empty() {
                Some(QuoteRecord::new(text))
            } else {
                Some(QuoteRecord::with_author(text, author))
            }
        }
        None => Some(QuoteRecord::new(s)),
    }
}
