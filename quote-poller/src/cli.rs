use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{self, PollerConfig};

/// Quote Poller - периодически запрашивает поле котировки и пишет строки метрик
/// в stdout или по TCP в коллектор.
#[derive(Parser, Debug, Clone)]
#[command(name = "quote-poller", version, about)]
#[command(
    group(
        ArgGroup::new("tickers_source")
            .required(false)
            .multiple(false)
            .args(["tickers_file", "tickers"])
    )
)]
pub(crate) struct Args {
    /// Хост коллектора метрик
    #[arg(short = 's', long, default_value = config::DEFAULT_HOST)]
    pub(crate) host: String,

    /// Порт коллектора метрик
    #[arg(short, long, default_value_t = config::DEFAULT_PORT)]
    pub(crate) port: u16,

    /// Пауза между опросами, секунды
    #[arg(short, long, default_value_t = config::DEFAULT_DELAY_S)]
    pub(crate) delay: u64,

    /// Число опросов; отрицательное = бесконечно
    #[arg(short, long, default_value_t = config::DEFAULT_COUNT, allow_negative_numbers = true)]
    pub(crate) count: i64,

    /// Реально отправлять метрики на host:port (иначе печать в stdout)
    #[arg(short = 'S', long)]
    pub(crate) send: bool,

    /// Файл тикеров (по одному на строку, поддержка # комментариев)
    #[arg(long, conflicts_with = "tickers")]
    pub(crate) tickers_file: Option<PathBuf>,

    /// Список тикеров строкой, например: "AAPL, ^IXIC, GOOG"
    #[arg(long, conflicts_with = "tickers_file")]
    pub(crate) tickers: Option<String>,

    /// Поле котировки: имя (last_trade_price) или код тега (l1)
    #[arg(long, default_value = config::DEFAULT_FIELD)]
    pub(crate) field: String,

    /// Имя метрики в выходной строке
    #[arg(long, default_value = quote_core::metric::DEFAULT_METRIC)]
    pub(crate) metric: String,

    /// Эндпоинт котировок
    #[arg(long, default_value = quote_core::DEFAULT_QUOTE_URL)]
    pub(crate) base_url: String,

    /// Таймаут HTTP-запроса, секунды
    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT_S)]
    pub(crate) timeout: u64,

    /// Сколько циклов подряд может упасть, прежде чем поллер остановится
    #[arg(long, default_value_t = config::DEFAULT_MAX_ERRORS)]
    pub(crate) max_errors: usize,
}

impl Args {
    /// Валидация аргументов
    pub(crate) fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            bail!("--host is empty");
        }
        if self.field.trim().is_empty() {
            bail!("--field is empty");
        }
        if self.metric.is_empty() || self.metric.contains(char::is_whitespace) {
            bail!("--metric must be a non-empty name without spaces (got: {:?})", self.metric);
        }
        if self.max_errors == 0 {
            bail!("--max-errors must be at least 1");
        }
        if self.timeout == 0 {
            bail!("--timeout must be at least 1 second");
        }

        if let Some(path) = &self.tickers_file {
            let md = std::fs::metadata(path)
                .with_context(|| format!("tickers file not found: {:?}", path))?;
            if !md.is_file() {
                bail!("--tickers-file must point to a file: {:?}", path);
            }
        }

        Ok(())
    }

    pub(crate) fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub(crate) fn poller_config(&self, symbols: Vec<String>) -> PollerConfig {
        PollerConfig {
            symbols,
            field: self.field.trim().to_string(),
            metric: self.metric.clone(),
            delay: Duration::from_secs(self.delay),
            count: self.count,
            max_errors: self.max_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["quote-poller"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_match_collector_conventions() {
        let args = parse(&[]);
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.port, 2878);
        assert_eq!(args.delay, 10);
        assert_eq!(args.count, -1);
        assert!(!args.send);
        assert_eq!(args.field, "last_trade_price");
        assert_eq!(args.metric, "stock.price");
        args.validate().unwrap();
    }

    #[test]
    fn short_flags_and_negative_count() {
        let args = parse(&["-s", "10.0.0.5", "-p", "4242", "-d", "1", "-c", "-1", "-S"]);
        assert_eq!(args.host, "10.0.0.5");
        assert_eq!(args.port, 4242);
        assert_eq!(args.delay, 1);
        assert_eq!(args.count, -1);
        assert!(args.send);
    }

    #[test]
    fn tickers_sources_are_mutually_exclusive() {
        let res = Args::try_parse_from([
            "quote-poller",
            "--tickers",
            "AAPL",
            "--tickers-file",
            "x.txt",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn validate_rejects_zero_error_budget_and_bad_metric() {
        assert!(parse(&["--max-errors", "0"]).validate().is_err());
        assert!(parse(&["--metric", "stock price"]).validate().is_err());
        assert!(parse(&["--field", " "]).validate().is_err());
    }

    #[test]
    fn validate_rejects_missing_tickers_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        let args = parse(&["--tickers-file", path.to_str().unwrap()]);
        let err = args.validate().unwrap_err();
        assert!(err.to_string().contains("tickers file not found"));
    }

    #[test]
    fn poller_config_carries_cli_values() {
        let args = parse(&["-d", "3", "-c", "2", "--field", " l1 "]);
        let cfg = args.poller_config(vec!["IBM".to_string()]);
        assert_eq!(cfg.delay, Duration::from_secs(3));
        assert_eq!(cfg.count, 2);
        assert_eq!(cfg.field, "l1");
        assert_eq!(cfg.symbols, vec!["IBM"]);
    }
}
