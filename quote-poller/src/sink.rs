use anyhow::{Context, anyhow, bail};
use log::debug;
use quote_core::MetricLine;
use std::io::Write;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};

use crate::config::{TCP_CONNECT_TIMEOUT, TCP_WRITE_TIMEOUT};

/// Куда уходят строки метрик одного цикла
pub(crate) trait MetricSink {
    /// Опубликовать все строки цикла
    fn publish(&mut self, lines: &[MetricLine]) -> anyhow::Result<()>;

    /// Цикл закончен; `remaining`/`total` как у `--count`
    fn cycle_done(&mut self, _remaining: i64, _total: i64) {}
}

/// Печать в stdout (или любой Write), режим без `--send`
pub(crate) struct StdoutSink<W: Write> {
    out: W,
}

impl<W: Write> StdoutSink<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MetricSink for StdoutSink<W> {
    fn publish(&mut self, lines: &[MetricLine]) -> anyhow::Result<()> {
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn cycle_done(&mut self, remaining: i64, total: i64) {
        if total > 0 {
            // stdout закрыт - не повод ронять поллер
            let _ = writeln!(
                self.out,
                "---- {remaining} left to go (of {total}) ----"
            );
            let _ = self.out.flush();
        }
    }
}

/// TCP в коллектор: connect, отправить всё, close - на каждый цикл
pub(crate) struct TcpSink {
    host: String,
    port: u16,
}

impl TcpSink {
    pub(crate) fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    fn connect(&self) -> anyhow::Result<TcpStream> {
        // резолвим на каждом цикле: адрес коллектора может поменяться
        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("resolve {}:{}", self.host, self.port))?
            .collect();
        if addrs.is_empty() {
            bail!("no addresses resolved for {}:{}", self.host, self.port);
        }

        let stream = connect_any(&addrs)?;
        stream.set_nodelay(true).ok();
        stream.set_write_timeout(Some(TCP_WRITE_TIMEOUT)).ok();
        Ok(stream)
    }
}

/// Пробует адреса по очереди; ошибка только если не подошёл ни один
fn connect_any(addrs: &[SocketAddr]) -> anyhow::Result<TcpStream> {
    let mut last_err = None;
    for addr in addrs {
        match TcpStream::connect_timeout(addr, TCP_CONNECT_TIMEOUT) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!("connect to {addr} failed: {e}");
                last_err =
                    Some(anyhow::Error::new(e).context(format!("connect to collector {addr}")));
            }
        }
    }
    Err(last_err.unwrap_or_else(|| anyhow!("no collector addresses to try")))
}

impl MetricSink for TcpSink {
    fn publish(&mut self, lines: &[MetricLine]) -> anyhow::Result<()> {
        let mut stream = self.connect()?;

        let payload: String = lines.iter().map(MetricLine::to_wire).collect();
        stream
            .write_all(payload.as_bytes())
            .context("send metric lines")?;
        stream.flush()?;
        stream.shutdown(std::net::Shutdown::Both).ok();

        debug!("sent {} lines to {}:{}", lines.len(), self.host, self.port);
        Ok(())
    }
}
