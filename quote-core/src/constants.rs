use std::time::Duration;

/// Эндпоинт котировок в CSV
pub const DEFAULT_QUOTE_URL: &str = "http://finance.yahoo.com/d/quotes.csv";

/// Значение, которым провайдер помечает недоступное поле
pub const NOT_AVAILABLE: &str = "N/A";

/// Ключ для идентификаторов, которые не удалось сопоставить имени поля
pub const UNKNOWN_FIELD: &str = "unknown";

/// Таймаут HTTP-запроса по умолчанию
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) const USER_AGENT: &str = concat!("quote-core/", env!("CARGO_PKG_VERSION"));
