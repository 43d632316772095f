use std::sync::Mutex;
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use crate::constants::{DEFAULT_HTTP_TIMEOUT, USER_AGENT};
use crate::error::TransportError;
use crate::request::QuoteRequest;

/// Шов между клиентом и сетью: один GET, тело ответа текстом.
///
/// Дедлайны и прочая сетевая политика живут в реализации, не в клиенте.
pub trait Transport {
    /// Выполнить запрос и вернуть тело ответа
    fn fetch(&self, request: &QuoteRequest) -> Result<String, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch(&self, request: &QuoteRequest) -> Result<String, TransportError> {
        (**self).fetch(request)
    }
}

/// Блокирующий HTTP транспорт на `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Транспорт с таймаутом по умолчанию
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT)
    }

    /// Транспорт с заданным таймаутом на весь запрос
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, request: &QuoteRequest) -> Result<String, TransportError> {
        let url = request.to_url();
        debug!("GET {url}");

        let resp = self.http.get(url.clone()).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(resp.text()?)
    }
}

/// Транспорт с заготовленными ответами, запоминает все запросы.
///
/// Вызов `i` получает ответ `i`; когда ответы кончаются, повторяется последний.
/// `Err(msg)` превращается в [`TransportError::Unavailable`].
#[derive(Debug)]
pub struct StaticTransport {
    replies: Vec<Result<String, String>>,
    requests: Mutex<Vec<QuoteRequest>>,
}

impl StaticTransport {
    /// Всегда отвечает одним и тем же телом
    pub fn new(body: impl Into<String>) -> Self {
        Self::scripted(vec![Ok(body.into())])
    }

    /// Всегда падает с [`TransportError::Unavailable`]
    pub fn failing(msg: impl Into<String>) -> Self {
        Self::scripted(vec![Err(msg.into())])
    }

    /// Последовательность ответов
    pub fn scripted(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Сколько раз вызывался `fetch`
    pub fn calls(&self) -> usize {
        self.lock().len()
    }

    /// Последний полученный запрос
    pub fn last_request(&self) -> Option<QuoteRequest> {
        self.lock().last().cloned()
    }

    /// Все полученные запросы по порядку
    pub fn requests(&self) -> Vec<QuoteRequest> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<QuoteRequest>> {
        match self.requests.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(), // продолжаем, несмотря на poison
        }
    }
}

impl Transport for StaticTransport {
    fn fetch(&self, request: &QuoteRequest) -> Result<String, TransportError> {
        let call = {
            let mut requests = self.lock();
            requests.push(request.clone());
            requests.len() - 1
        };

        let reply = self
            .replies
            .get(call)
            .or_else(|| self.replies.last())
            .ok_or_else(|| TransportError::Unavailable("no replies scripted".to_string()))?;

        reply.clone().map_err(TransportError::Unavailable)
    }
}
