use indexmap::IndexMap;

/// Сырые значения одной строки ответа, по одному на запрошенный тег
pub type QuoteRow = Vec<String>;

/// Поле -> сырое значение, в порядке запроса.
///
/// Повторная вставка ключа перезаписывает значение на прежней позиции.
pub type SymbolQuote = IndexMap<String, String>;

/// Тикер -> поля, в порядке запроса
pub type QuoteResult = IndexMap<String, SymbolQuote>;

/// Тикер -> сырая строка ответа, в порядке запроса
pub type TagRows = IndexMap<String, QuoteRow>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_first_position_on_repeat() {
        let mut q = SymbolQuote::new();
        assert_eq!(q.insert("unknown".into(), "1".into()), None);
        q.insert("company_name".into(), "IBM".into());
        assert_eq!(
            q.insert("unknown".into(), "2".into()),
            Some("1".to_string())
        );

        let keys: Vec<&str> = q.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["unknown", "company_name"]);
        assert_eq!(q["unknown"], "2");
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn serializes_as_map_in_insertion_order() {
        let mut goog = SymbolQuote::new();
        goog.insert("previous_close".into(), "123.45".into());
        goog.insert("company_name".into(), "Google Inc.".into());

        let mut result = QuoteResult::new();
        result.insert("GOOG".into(), goog);

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"GOOG":{"previous_close":"123.45","company_name":"Google Inc."}}"#
        );
    }
}
