use std::io::Write;

use quote_core::{QuoteResult, TagCatalog, TagRows};
use serde::Serialize;

#[derive(Serialize)]
struct TagView<'a> {
    name: &'a str,
    code: &'a str,
}

/// Тикер, затем `поле: значение` с отступом
pub(crate) fn write_quotes<W: Write>(out: &mut W, result: &QuoteResult, json: bool) -> anyhow::Result<()> {
    if json {
        return write_json(out, result);
    }

    for (symbol, quote) in result.iter() {
        writeln!(out, "{symbol}")?;
        for (field, value) in quote.iter() {
            writeln!(out, "  {field}: {value}")?;
        }
    }
    Ok(())
}

/// Тикер и значения через табуляцию
pub(crate) fn write_rows<W: Write>(out: &mut W, rows: &TagRows, json: bool) -> anyhow::Result<()> {
    if json {
        return write_json(out, rows);
    }

    for (symbol, row) in rows.iter() {
        writeln!(out, "{symbol}\t{}", row.join("\t"))?;
    }
    Ok(())
}

pub(crate) fn write_catalog<W: Write>(out: &mut W, catalog: &TagCatalog, json: bool) -> anyhow::Result<()> {
    if json {
        let view: Vec<TagView<'_>> = catalog
            .iter()
            .map(|e| TagView {
                name: &e.name,
                code: &e.code,
            })
            .collect();
        return write_json(out, &view);
    }

    for e in catalog.iter() {
        writeln!(out, "{}\t{}", e.code, e.name)?;
    }
    Ok(())
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::SymbolQuote;

    fn result() -> QuoteResult {
        let mut goog = SymbolQuote::new();
        goog.insert("company_name".into(), "Google Inc.".into());
        goog.insert("previous_close".into(), "123.45".into());

        let mut out = QuoteResult::new();
        out.insert("GOOG".into(), goog);
        out
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> anyhow::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn quotes_as_text() {
        let text = render(|w| write_quotes(w, &result(), false));
        assert_eq!(
            text,
            "GOOG\n  company_name: Google Inc.\n  previous_close: 123.45\n"
        );
    }

    #[test]
    fn quotes_as_json_keep_order() {
        let text = render(|w| write_quotes(w, &result(), true));
        let company = text.find("company_name").unwrap();
        let close = text.find("previous_close").unwrap();
        assert!(company < close);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["GOOG"]["previous_close"], "123.45");
    }

    #[test]
    fn rows_as_text() {
        let rows: TagRows = [(
            "GOOG".to_string(),
            vec!["Google Inc.".to_string(), "N/A".to_string()],
        )]
        .into_iter()
        .collect();
        let text = render(|w| write_rows(w, &rows, false));
        assert_eq!(text, "GOOG\tGoogle Inc.\tN/A\n");
    }

    #[test]
    fn catalog_lists_code_then_name() {
        let catalog = TagCatalog::new([("previous_close", "p"), ("volume", "v")]);
        let text = render(|w| write_catalog(w, &catalog, false));
        assert_eq!(text, "p\tprevious_close\nv\tvolume\n");

        let json = render(|w| write_catalog(w, &catalog, true));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["name"], "volume");
        assert_eq!(value[1]["code"], "v");
    }
}
