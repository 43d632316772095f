use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::time::Duration;

const DEFAULT_TIMEOUT_S: u64 = 10;

/// Quote Fetch - разовый запрос котировок: все поля, строка тегов или список полей.
#[derive(Parser, Debug, Clone)]
#[command(name = "quote-fetch", version, about)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// Вывод в JSON (порядок тикеров и полей сохраняется)
    #[arg(long, global = true)]
    pub(crate) json: bool,

    /// Эндпоинт котировок
    #[arg(long, global = true, default_value = quote_core::DEFAULT_QUOTE_URL)]
    pub(crate) base_url: String,

    /// Таймаут HTTP-запроса, секунды
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_S)]
    pub(crate) timeout: u64,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Все поля справочника для тикеров
    All {
        /// Тикеры: отдельными аргументами или через запятую
        #[arg(required = true)]
        symbols: Vec<String>,
    },

    /// Сырая строка тегов, например `np1v`, без имён полей
    Tag {
        /// Тикеры: отдельными аргументами или через запятую
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Код тега, склейка кодов или имя поля
        #[arg(long)]
        tags: String,
    },

    /// Поля по именам или кодам
    Fields {
        /// Тикеры: отдельными аргументами или через запятую
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Имя поля или код тега; можно повторять
        #[arg(short = 'f', long = "field", required = true)]
        fields: Vec<String>,
    },

    /// Показать справочник тегов (без сети)
    Catalog,
}

impl Args {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.timeout == 0 {
            bail!("--timeout must be at least 1 second");
        }
        if let Command::Tag { tags, .. } = &self.command
            && tags.trim().is_empty()
        {
            bail!("--tags is empty");
        }
        Ok(())
    }

    pub(crate) fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Тикеры из аргументов: "goog,aapl" и "goog aapl" дают одно и то же
pub(crate) fn normalize_symbols(raw: &[String]) -> Vec<String> {
    quote_core::tickers::parse_tickers_csv(&raw.join(","))
}
