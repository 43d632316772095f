use url::Url;
use url::form_urlencoded::byte_serialize;

/// Один батч-запрос: все тикеры и вся строка тегов в одном GET.
///
/// Порядок `symbols` это часть контракта: строка `i` ответа относится к тикеру `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    base: Url,
    symbols: Vec<String>,
    tags: String,
}

impl QuoteRequest {
    pub(crate) fn new<S: AsRef<str>>(base: Url, symbols: &[S], tags: impl Into<String>) -> Self {
        Self {
            base,
            symbols: symbols.iter().map(|s| s.as_ref().to_string()).collect(),
            tags: tags.into(),
        }
    }

    /// Тикеры в порядке запроса
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Склеенная строка тегов (параметр `f`)
    pub fn tags(&self) -> &str {
        &self.tags
    }

    /// Значение параметра `s` до URL-кодирования: тикеры через `+`
    pub fn symbol_param(&self) -> String {
        self.symbols.join("+")
    }

    /// Итоговый URL: `<base>?s=AAA+BBB&f=<tags>`.
    ///
    /// Каждый тикер кодируется отдельно, `+` между ними остаётся литеральным.
    /// Query базового URL заменяется.
    pub fn to_url(&self) -> Url {
        let s = self
            .symbols
            .iter()
            .map(|sym| encode(sym))
            .collect::<Vec<_>>()
            .join("+");

        let mut url = self.base.clone();
        url.set_query(Some(&format!("s={}&f={}", s, encode(&self.tags))));
        url
    }
}

fn encode(raw: &str) -> String {
    byte_serialize(raw.as_bytes()).collect()
}
