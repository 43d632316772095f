use std::fmt;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use log::{debug, info, warn};
use quote_core::{MetricLine, NOT_AVAILABLE, QuoteClient, QuoteError, Transport};

use crate::config::PollerConfig;
use crate::sink::MetricSink;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct PollStats {
    pub(crate) cycles: u64,
    pub(crate) failed_cycles: u64,
    pub(crate) lines: u64,
}

impl fmt::Display for PollStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cycles={} failed={} lines={}",
            self.cycles, self.failed_cycles, self.lines
        )
    }
}

/// Один запрос котировок -> строки метрик в порядке тикеров
pub(crate) fn poll_once<T: Transport>(
    client: &QuoteClient<T>,
    cfg: &PollerConfig,
) -> Result<Vec<MetricLine>, QuoteError> {
    let result = client.fetch_field(&cfg.symbols, &cfg.field)?;

    let mut lines = Vec::with_capacity(cfg.symbols.len());
    let mut unavailable = 0usize;
    for symbol in &cfg.symbols {
        // одно поле на тикер: берём первое значение
        let Some((_, value)) = result.get(symbol).and_then(|q| q.iter().next()) else {
            continue;
        };
        if value == NOT_AVAILABLE {
            unavailable += 1;
        }
        // пробел внутри значения коллектор примет за разделитель
        if value.is_empty() || value.contains(char::is_whitespace) {
            warn!("{symbol}: skipping value {value:?}, not a metric value");
            continue;
        }
        lines.push(MetricLine::new(&cfg.metric, value, symbol));
    }

    if unavailable > 0 {
        debug!("{unavailable} of {} symbols reported {NOT_AVAILABLE}", lines.len());
    }
    Ok(lines)
}

/// Цикл опроса.
///
/// Любая ошибка цикла считается временной; после `max_errors` неудачных циклов
/// подряд поллер сдаётся. Пауза между циклами прерывается сигналом из `shutdown`.
pub(crate) fn run_poller<T: Transport, S: MetricSink>(
    client: &QuoteClient<T>,
    sink: &mut S,
    cfg: &PollerConfig,
    shutdown: &Receiver<()>,
) -> anyhow::Result<PollStats> {
    let mut stats = PollStats::default();
    let mut remaining = cfg.count;
    let mut back_to_back_err_count = 0usize;

    while remaining != 0 {
        stats.cycles += 1;

        let res = poll_once(client, cfg)
            .map_err(anyhow::Error::from)
            .and_then(|lines| sink.publish(&lines).map(|()| lines.len()));

        match res {
            Ok(n) => {
                back_to_back_err_count = 0;
                stats.lines += n as u64;
                info!("cycle {}: published {n} lines", stats.cycles);
            }
            Err(e) => {
                back_to_back_err_count += 1;
                stats.failed_cycles += 1;
                warn!(
                    "cycle {} failed ({back_to_back_err_count}/{}): {e:#}",
                    stats.cycles, cfg.max_errors
                );
                if back_to_back_err_count >= cfg.max_errors {
                    return Err(e.context(format!(
                        "giving up after {back_to_back_err_count} consecutive failed cycles"
                    )));
                }
            }
        }

        if remaining > 0 {
            remaining -= 1;
        }
        sink.cycle_done(remaining, cfg.count);

        if remaining == 0 {
            break;
        }

        match shutdown.recv_timeout(cfg.delay) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                info!("shutting down poller");
                break;
            }
        }
    }

    Ok(stats)
}
