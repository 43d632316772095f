use std::sync::{Arc, LazyLock};

use log::debug;
use url::Url;

use crate::catalog::{ResolvedField, TagCatalog, split_tag_string};
use crate::constants::DEFAULT_QUOTE_URL;
use crate::error::{QuoteError, Result, TransportError};
use crate::request::QuoteRequest;
use crate::response::parse_rows;
use crate::transport::{HttpTransport, Transport};
use crate::types::{QuoteResult, QuoteRow, SymbolQuote, TagRows};

static DEFAULT_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_QUOTE_URL).expect("valid default quote URL"));

/// Клиент котировок: разрешает поля через [`TagCatalog`], шлёт один батч-запрос
/// на вызов и собирает ответ по позициям.
///
/// Между вызовами состояния нет, только неизменяемая конфигурация.
#[derive(Debug, Clone)]
pub struct QuoteClient<T> {
    transport: T,
    catalog: Arc<TagCatalog>,
    base: Url,
}

impl QuoteClient<HttpTransport> {
    /// HTTP клиент со стандартным справочником и эндпоинтом
    pub fn http() -> Result<Self> {
        Ok(Self::new(HttpTransport::new()?))
    }
}

impl<T: Transport> QuoteClient<T> {
    /// Клиент поверх произвольного транспорта
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            catalog: TagCatalog::standard(),
            base: DEFAULT_BASE.clone(),
        }
    }

    /// Клиент с другим эндпоинтом (зеркало, мок-сервер)
    pub fn with_base_url(transport: T, base: &str) -> Result<Self> {
        let base = Url::parse(base).map_err(TransportError::from)?;
        Ok(Self {
            base,
            ..Self::new(transport)
        })
    }

    /// Заменить справочник тегов
    pub fn with_catalog(mut self, catalog: Arc<TagCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Справочник, которым пользуется клиент
    pub fn catalog(&self) -> &TagCatalog {
        &self.catalog
    }

    /// Эндпоинт котировок
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Транспорт (нужен тестам, чтобы посмотреть на запросы)
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Собрать батч-запрос без отправки
    pub fn build_request<S: AsRef<str>>(&self, symbols: &[S], tag_string: &str) -> QuoteRequest {
        QuoteRequest::new(self.base.clone(), symbols, tag_string)
    }

    /// Все поля справочника в порядке таблицы, одним запросом.
    pub fn fetch_all<S: AsRef<str>>(&self, symbols: &[S]) -> Result<QuoteResult> {
        let fields: Vec<&str> = self.catalog.iter().map(|e| e.name.as_str()).collect();
        self.fetch_by_fields(symbols, &fields)
    }

    /// Нижний уровень: строка тегов как есть, без имён полей.
    ///
    /// Если вся строка целиком является именем поля, она заменяется его кодом.
    /// Каждая строка ответа обрезается до числа позиций в строке тегов.
    pub fn fetch_by_tag_string<S: AsRef<str>>(
        &self,
        symbols: &[S],
        tag_string: &str,
    ) -> Result<TagRows> {
        ensure_symbols(symbols)?;
        if tag_string.is_empty() {
            return Err(QuoteError::EmptyTags);
        }

        let tags = self.catalog.resolve(tag_string);
        let columns = split_tag_string(tags).len();
        debug!(
            "fetch_by_tag_string: symbols={} tags={tags} columns={columns}",
            symbols.len()
        );

        let rows = self.request_rows(symbols, tags, columns)?;

        let mut out = TagRows::with_capacity(symbols.len());
        for (symbol, mut row) in symbols.iter().zip(rows) {
            row.truncate(columns);
            out.insert(symbol.as_ref().to_string(), row);
        }
        Ok(out)
    }

    /// Поля по именам или кодам, одним запросом.
    ///
    /// Значение `i` строки ответа относится к полю `i` списка. Неизвестные
    /// идентификаторы уходят в запрос как коды и попадают под ключ
    /// [`UNKNOWN_FIELD`](crate::UNKNOWN_FIELD); несколько таких полей схлопываются в одно.
    pub fn fetch_by_fields<S: AsRef<str>, F: AsRef<str>>(
        &self,
        symbols: &[S],
        fields: &[F],
    ) -> Result<QuoteResult> {
        ensure_symbols(symbols)?;
        if fields.is_empty() {
            return Err(QuoteError::EmptyTags);
        }

        let resolved: Vec<ResolvedField> = fields
            .iter()
            .map(|f| self.catalog.resolve_field(f.as_ref()))
            .collect();
        let tags: String = resolved.iter().map(|f| f.code.as_str()).collect();
        debug!(
            "fetch_by_fields: symbols={} fields={} tags={tags}",
            symbols.len(),
            resolved.len()
        );

        let rows = self.request_rows(symbols, &tags, resolved.len())?;

        let mut out = QuoteResult::with_capacity(symbols.len());
        for (symbol, row) in symbols.iter().zip(rows) {
            let mut quote = SymbolQuote::with_capacity(resolved.len());
            for (field, value) in resolved.iter().zip(row) {
                quote.insert(field.name.clone(), value);
            }
            out.insert(symbol.as_ref().to_string(), quote);
        }
        Ok(out)
    }

    /// Одно поле для набора тикеров
    pub fn fetch_field<S: AsRef<str>>(&self, symbols: &[S], field: &str) -> Result<QuoteResult> {
        self.fetch_by_fields(symbols, &[field])
    }

    /// Набор полей для одного тикера
    pub fn fetch_symbol<F: AsRef<str>>(&self, symbol: &str, fields: &[F]) -> Result<SymbolQuote> {
        let result = self.fetch_by_fields(&[symbol], fields)?;
        Ok(result.into_iter().next().map(|(_, q)| q).unwrap_or_default())
    }

    fn request_rows<S: AsRef<str>>(
        &self,
        symbols: &[S],
        tags: &str,
        columns: usize,
    ) -> Result<Vec<QuoteRow>> {
        let request = self.build_request(symbols, tags);
        let body = self.transport.fetch(&request)?;
        Ok(parse_rows(&body, symbols, columns)?)
    }
}

fn ensure_symbols<S>(symbols: &[S]) -> Result<()> {
    if symbols.is_empty() {
        return Err(QuoteError::EmptySymbols);
    }
    Ok(())
}
