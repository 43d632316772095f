//! # quote-core
//!
//! Получение котировок у CSV-провайдера и всё, что вокруг этого нужно поллеру.
//!
//! Этот крейт содержит:
//!
//! - [`catalog`] — справочник «имя поля ↔ код тега» и правила разрешения идентификаторов
//! - [`client`] — [`QuoteClient`]: батч-запрос на все тикеры и сборка ответа по позициям
//! - [`request`] — построение URL запроса (`s=AAA+BBB&f=<теги>`)
//! - [`response`] — разбор CSV-ответа с проверкой формы
//! - [`transport`] — шов для HTTP ([`HttpTransport`]) и тестовый [`StaticTransport`]
//! - [`tickers`] — чтение и нормализация списка тикеров из текста/файла
//! - [`metric`] — строка метрики `stock.price 123.45 host=GOOG`
//! - [`types`] — результаты, сохраняющие порядок запроса
//! - [`error`] — типы ошибок
//!
//! ## Быстрый пример: поля по именам
//!
//! ```rust
//! use quote_core::{QuoteClient, StaticTransport};
//!
//! let body = "\"Google Inc.\",123.45\n\"Apple Inc.\",678.90";
//! let client = QuoteClient::new(StaticTransport::new(body));
//!
//! let result = client
//!     .fetch_by_fields(&["GOOG", "AAPL"], &["company_name", "previous_close"])
//!     .unwrap();
//!
//! assert_eq!(result["GOOG"]["company_name"], "Google Inc.");
//! assert_eq!(result["AAPL"]["previous_close"], "678.90");
//! assert_eq!(client.transport().calls(), 1);
//! ```
//!
//! ## Пример: разрешение идентификаторов
//!
//! ```rust
//! use quote_core::TagCatalog;
//!
//! let catalog = TagCatalog::standard();
//! assert_eq!(catalog.resolve("previous_close"), "p");
//! assert_eq!(catalog.resolve("p1"), "p1");
//! assert_eq!(catalog.resolve_field("v").name, "more_info");
//! ```
//!
//! ## Дизайн
//!
//! Клиент синхронный и без состояния: один вызов = один блокирующий GET.
//! Ретраи, паузы и отправка метрик живут в `quote-poller`, не здесь.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Справочник тегов.
pub mod catalog;

/// Клиент котировок.
pub mod client;

/// Ошибки `quote-core`.
pub mod error;

/// Строки метрик для коллектора.
pub mod metric;

/// Построение запроса.
pub mod request;

/// Разбор ответа.
pub mod response;

/// Чтение/нормализация списка тикеров из текста и файлов.
pub mod tickers;

/// Транспорт.
pub mod transport;

/// Доменные типы результата.
pub mod types;

/// Общие константы
mod constants;
pub use constants::{DEFAULT_HTTP_TIMEOUT, DEFAULT_QUOTE_URL, NOT_AVAILABLE, UNKNOWN_FIELD};

// --- Re-exports (публичный фасад API) ---

pub use crate::catalog::{ResolvedField, TagCatalog};
pub use crate::client::QuoteClient;
pub use crate::error::{ParseError, QuoteError, TransportError};
pub use crate::metric::MetricLine;
pub use crate::request::QuoteRequest;
pub use crate::transport::{HttpTransport, StaticTransport, Transport};
pub use crate::types::{QuoteResult, QuoteRow, SymbolQuote, TagRows};
