use csv::ReaderBuilder;
use log::trace;

use crate::error::ParseError;
use crate::types::QuoteRow;

/// Раскладывает тело ответа на строки: по одной на тикер, в порядке запроса.
///
/// - строк должно быть ровно `symbols.len()`
/// - в каждой строке не меньше `min_columns` колонок (лишние не отбрасываются здесь)
/// - значения не интерпретируются, `N/A` остаётся как есть
pub fn parse_rows<S: AsRef<str>>(
    body: &str,
    symbols: &[S],
    min_columns: usize,
) -> Result<Vec<QuoteRow>, ParseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.trim().as_bytes());

    let mut rows = Vec::with_capacity(symbols.len());
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect::<QuoteRow>());
    }

    trace!(
        "response shape: rows={} expected_rows={} min_columns={}",
        rows.len(),
        symbols.len(),
        min_columns
    );

    if rows.len() != symbols.len() {
        return Err(ParseError::RowCount {
            expected: symbols.len(),
            got: rows.len(),
        });
    }

    for (row, symbol) in rows.iter().zip(symbols) {
        if row.len() < min_columns {
            return Err(ParseError::ColumnCount {
                symbol: symbol.as_ref().to_string(),
                expected: min_columns,
                got: row.len(),
            });
        }
    }

    Ok(rows)
}
