use assert_cmd::Command;
use httpmock::{Method::GET, MockServer};
use predicates::prelude::*;

fn poller() -> Command {
    Command::cargo_bin("quote-poller").unwrap()
}

#[test]
fn help_lists_collector_flags() {
    poller()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--send"))
        .stdout(predicate::str::contains("--tickers-file"))
        .stdout(predicate::str::contains("--max-errors"));
}

#[test]
fn zero_count_exits_without_polling() {
    poller()
        .args(["--count", "0", "--tickers", "AAPL"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn conflicting_ticker_sources_are_rejected() {
    poller()
        .args(["--tickers", "AAPL", "--tickers-file", "tickers.txt"])
        .assert()
        .failure();
}

#[test]
fn missing_tickers_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");

    poller()
        .args(["--count", "1", "--tickers-file"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("tickers file not found"));
}

#[test]
fn one_cycle_prints_metric_lines() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/d/quotes.csv").query_param("f", "l1");
        then.status(200).body("123.45\r\n4500.10\r\n");
    });

    poller()
        .args(["--count", "1", "--delay", "0", "--tickers", "GOOG,^IXIC"])
        .arg("--base-url")
        .arg(server.url("/d/quotes.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("stock.price 123.45 host=GOOG\n"))
        .stdout(predicate::str::contains("stock.price 4500.10 host=IXIC\n"))
        .stdout(predicate::str::contains("---- 0 left to go (of 1) ----"));

    mock.assert();
}

#[test]
fn failing_endpoint_exhausts_error_budget() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/d/quotes.csv");
        then.status(503);
    });

    poller()
        .args(["--delay", "0", "--max-errors", "2", "--tickers", "GOOG"])
        .arg("--base-url")
        .arg(server.url("/d/quotes.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 consecutive failed cycles"));

    mock.assert_calls(2);
}
