use thiserror::Error;

/// Верхнеуровневый тип ошибок крейта
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Ошибки транспорта (запрос не ушёл или ответ не получен)
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Ответ не раскладывается в ожидаемую форму
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Список тикеров пуст
    #[error("symbols list is empty")]
    EmptySymbols,

    /// Не запрошено ни одного поля/тега
    #[error("tags list is empty")]
    EmptyTags,
}

/// Ошибки транспорта
#[derive(Debug, Error)]
pub enum TransportError {
    /// Ошибка HTTP-клиента (connect, timeout, чтение тела)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Сервер ответил не 2xx
    #[error("unexpected response status: {status} at {url}")]
    Status {
        /// HTTP статус
        status: u16,
        /// URL запроса
        url: String,
    },

    /// Некорректный базовый URL
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Транспорт недоступен (используется тестовыми реализациями)
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// Ошибки разбора ответа
#[derive(Debug, Error)]
pub enum ParseError {
    /// CSV не читается
    #[error("csv decode error: {0}")]
    Csv(#[from] csv::Error),

    /// Число строк ответа не совпадает с числом тикеров
    #[error("expected {expected} rows, got {got}")]
    RowCount {
        /// сколько тикеров запрошено
        expected: usize,
        /// сколько строк пришло
        got: usize,
    },

    /// В строке меньше колонок, чем запрошено тегов
    #[error("row for {symbol}: expected at least {expected} columns, got {got}")]
    ColumnCount {
        /// тикер, к которому относится строка
        symbol: String,
        /// сколько тегов запрошено
        expected: usize,
        /// сколько колонок пришло
        got: usize,
    },
}

/// Result с ошибкой крейта
pub type Result<T> = std::result::Result<T, QuoteError>;
