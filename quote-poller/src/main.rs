//! Точка входа `quote-poller`.
//!
//! Жизненный цикл:
//! - парсинг CLI и загрузка списка тикеров
//! - сборка HTTP клиента котировок
//! - цикл: один батч-запрос -> строки метрик -> stdout или TCP коллектор
//! - корректная остановка по `Ctrl+C` (прерывает паузу между циклами)

mod cli;
mod config;
mod poller;
mod sink;
mod tickers;

use anyhow::Context;
use clap::Parser;
use log::info;
use quote_core::{HttpTransport, QuoteClient};

use crate::sink::{StdoutSink, TcpSink};

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/debug/trace
    env_logger::init();

    let args = cli::Args::parse();
    args.validate()?;

    let symbols = tickers::load_tickers(&args)?;

    // Ctrl+C => сигнал в канал, цикл выходит из паузы
    let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(1);
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.try_send(());
        info!("shutting down...");
    })?;

    let transport =
        HttpTransport::with_timeout(args.http_timeout()).context("build HTTP transport")?;
    let client = QuoteClient::with_base_url(transport, &args.base_url)
        .with_context(|| format!("invalid --base-url {:?}", args.base_url))?;

    let cfg = args.poller_config(symbols);

    info!(
        "Starting quote-poller: field={}, metric={}, delay={:?}, count={}, send={}, tickers={}",
        cfg.field,
        cfg.metric,
        cfg.delay,
        cfg.count,
        args.send,
        cfg.symbols.join(",")
    );

    let stats = if args.send {
        let mut sink = TcpSink::new(args.host.clone(), args.port);
        poller::run_poller(&client, &mut sink, &cfg, &shutdown_rx)?
    } else {
        let mut sink = StdoutSink::new(std::io::stdout().lock());
        poller::run_poller(&client, &mut sink, &cfg, &shutdown_rx)?
    };

    info!("quote-poller finished: {stats}");
    Ok(())
}
