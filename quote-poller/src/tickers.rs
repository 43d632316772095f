use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cli::Args;
use crate::config;

#[derive(Debug, Error)]
pub(crate) enum TickersError {
    #[error("tickers list is empty (file: {path:?})")]
    EmptyFromFile { path: PathBuf },

    #[error("tickers list is empty (--tickers value: {raw:?})")]
    EmptyFromArg { raw: String },

    #[error("built-in tickers list is empty")]
    EmptyDefault,

    #[error("failed to read tickers file: {path:?}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) type Result<T> = std::result::Result<T, TickersError>;

/// Загружает тикеры из источника, выбранного в CLI:
/// - `--tickers-file` -> quote_core::tickers::read_tickers_from_path
/// - `--tickers`      -> quote_core::tickers::parse_tickers_csv
/// - ничего           -> встроенный список
pub(crate) fn load_tickers(args: &Args) -> Result<Vec<String>> {
    if let Some(path) = &args.tickers_file {
        load_from_file(path)
    } else if let Some(raw) = &args.tickers {
        load_from_arg(raw)
    } else {
        load_default()
    }
}

fn load_from_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref().to_path_buf();

    let tickers =
        config::load_default_or_file(Some(path.as_path())).map_err(|e| TickersError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

    if tickers.is_empty() {
        return Err(TickersError::EmptyFromFile { path });
    }

    Ok(tickers)
}

fn load_from_arg(raw: &str) -> Result<Vec<String>> {
    let tickers = quote_core::tickers::parse_tickers_csv(raw);

    if tickers.is_empty() {
        return Err(TickersError::EmptyFromArg {
            raw: raw.to_string(),
        });
    }

    Ok(tickers)
}

fn load_default() -> Result<Vec<String>> {
    // встроенный список читается из памяти, io-ошибке взяться неоткуда
    let tickers = config::load_default_or_file(None).unwrap_or_default();
    if tickers.is_empty() {
        return Err(TickersError::EmptyDefault);
    }
    Ok(tickers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn arg_source_wins_over_default() {
        let args = Args::try_parse_from(["quote-poller", "--tickers", "goog, ^ixic"]).unwrap();
        assert_eq!(load_tickers(&args).unwrap(), vec!["GOOG", "^IXIC"]);
    }

    #[test]
    fn empty_arg_is_error() {
        let args = Args::try_parse_from(["quote-poller", "--tickers", " , "]).unwrap();
        assert!(matches!(
            load_tickers(&args),
            Err(TickersError::EmptyFromArg { .. })
        ));
    }

    #[test]
    fn file_source_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"# list\nibm\nmsft # comment\n").unwrap();

        let args = Args::try_parse_from([
            "quote-poller",
            "--tickers-file",
            file.path().to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(load_tickers(&args).unwrap(), vec!["IBM", "MSFT"]);
    }

    #[test]
    fn comment_only_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"# nothing here\n").unwrap();

        assert!(matches!(
            load_from_file(file.path()),
            Err(TickersError::EmptyFromFile { .. })
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_from_file(dir.path().join("absent.txt")),
            Err(TickersError::ReadFile { .. })
        ));
    }

    #[test]
    fn no_source_uses_builtin_list() {
        let args = Args::try_parse_from(["quote-poller"]).unwrap();
        let tickers = load_tickers(&args).unwrap();
        assert!(tickers.contains(&"GOOG".to_string()));
    }
}
