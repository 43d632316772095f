use std::fmt;

/// Имя метрики по умолчанию
pub const DEFAULT_METRIC: &str = "stock.price";

/// Одна строка метрики: `<metric> <value> host=<SYMBOL>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricLine {
    /// имя метрики, например `stock.price`
    pub metric: String,
    /// сырое значение поля как пришло от провайдера
    pub value: String,
    /// тикер без маркера `^`
    pub host: String,
}

impl MetricLine {
    /// Строка для тикера; маркер `^` вырезается из host
    pub fn new(metric: impl Into<String>, value: impl Into<String>, symbol: &str) -> Self {
        Self {
            metric: metric.into(),
            value: value.into(),
            host: host_tag(symbol),
        }
    }

    /// Текстовый wire-формат: строка с `\n` на конце
    pub fn to_wire(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for MetricLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} host={}", self.metric, self.value, self.host)
    }
}

/// Тикер -> значение тега host
pub fn host_tag(symbol: &str) -> String {
    symbol.replace('^', "")
}
