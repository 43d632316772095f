use indexmap::IndexSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Чтение тикеров: по одному на строку или через запятую.
///
/// Порядок первого появления сохраняется: он же порядок строк в ответе провайдера.
pub fn read_tickers<R: io::Read>(reader: R) -> io::Result<Vec<String>> {
    let mut out = IndexSet::new();
    let buf = BufReader::new(reader);

    for line in buf.lines() {
        let line = line?;
        if let Some(body) = strip_comment(&line) {
            push_normalized(&mut out, body.split(','));
        }
    }

    Ok(out.into_iter().collect())
}

/// Чтение тикеров из файла
pub fn read_tickers_from_path(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let f = File::open(path)?;
    read_tickers(f)
}

/// Парсит список тикеров из строки вида "AAPL, ^IXIC, ,GOOG".
/// Правила:
/// - разделитель: запятая
/// - trim пробелов
/// - пустые элементы игнорируются
/// - нормализация: ASCII uppercase (маркер `^` не трогаем)
/// - результат: уникален, в порядке первого появления
pub fn parse_tickers_csv(raw: &str) -> Vec<String> {
    let mut out = IndexSet::new();
    push_normalized(&mut out, raw.split(','));
    out.into_iter().collect()
}

fn strip_comment(line: &str) -> Option<&str> {
    // Поддержка inline-комментариев: "AAPL # comment"
    let s = line.split('#').next().unwrap_or("").trim();
    if s.is_empty() {
        return None;
    }
    Some(s)
}

// повтор тикера не двигает его с первой позиции
fn push_normalized<'a>(out: &mut IndexSet<String>, parts: impl Iterator<Item = &'a str>) {
    for part in parts {
        let t = part.trim();
        if !t.is_empty() {
            out.insert(t.to_ascii_uppercase());
        }
    }
}
