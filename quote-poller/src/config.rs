use std::io;
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

const DEFAULT_TICKERS: &str = include_str!("../assets/tickers.txt");

pub(crate) const DEFAULT_HOST: &str = "127.0.0.1";
pub(crate) const DEFAULT_PORT: u16 = 2878;
pub(crate) const DEFAULT_DELAY_S: u64 = 10;
pub(crate) const DEFAULT_COUNT: i64 = -1;
pub(crate) const DEFAULT_FIELD: &str = "last_trade_price";
pub(crate) const DEFAULT_MAX_ERRORS: usize = 5;
pub(crate) const DEFAULT_TIMEOUT_S: u64 = 10;

pub(crate) const TCP_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub(crate) const TCP_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) fn load_default_or_file(path: Option<&Path>) -> io::Result<Vec<String>> {
    match path {
        Some(p) => quote_core::tickers::read_tickers_from_path(p),
        None => quote_core::tickers::read_tickers(Cursor::new(DEFAULT_TICKERS)),
    }
}

/// Настройки цикла опроса, собранные из CLI
#[derive(Debug, Clone)]
pub(crate) struct PollerConfig {
    pub(crate) symbols: Vec<String>,
    /// имя поля или код тега
    pub(crate) field: String,
    pub(crate) metric: String,
    pub(crate) delay: Duration,
    /// число циклов; отрицательное = бесконечно
    pub(crate) count: i64,
    /// сколько циклов подряд может упасть, прежде чем сдаться
    pub(crate) max_errors: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tickers_keep_file_order_and_skip_comments() {
        let tickers = load_default_or_file(None).unwrap();
        assert_eq!(tickers.first().map(String::as_str), Some("AAPL"));
        assert_eq!(tickers.last().map(String::as_str), Some("ZEN"));
        assert!(tickers.iter().any(|t| t == "^IXIC"));
        assert!(!tickers.iter().any(|t| t == "^DJI"));
        assert_eq!(tickers.len(), 31);
    }
}
