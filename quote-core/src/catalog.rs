//! Справочник полей провайдера: имя поля <-> короткий код тега.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::constants::UNKNOWN_FIELD;

/// Стандартная таблица `(имя поля, код тега)` в алфавитном порядке имён.
///
/// Коды не уникальны: `more_info` и `volume` оба отображаются в `v`.
pub const STANDARD_TAGS: &[(&str, &str)] = &[
    ("1_year_target", "t8"),
    ("200_sma", "m4"),
    ("50_sma", "m3"),
    ("52_week_high", "k"),
    ("52_week_low", "j"),
    ("52_week_range", "w"),
    ("after_hours_change", "c8"),
    ("annualized_gain", "g3"),
    ("ask_realtime", "b2"),
    ("ask_size", "a5"),
    ("average_daily_volume", "a2"),
    ("bid_realtime", "b3"),
    ("bid_size", "b6"),
    ("book_value", "b4"),
    ("change", "c1"),
    ("change_200_sma", "m5"),
    ("change_50_sma", "m7"),
    ("change_from_52_week_high", "k4"),
    ("change_from_52_week_low", "j5"),
    ("change_percent", "p2"),
    ("change_percent_change", "c"),
    ("change_percent_realtime", "k2"),
    ("change_realtime", "c6"),
    ("commission", "c3"),
    ("company_name", "n"),
    ("dividend_pay_date", "r1"),
    ("dividend_per_share", "d"),
    ("dividend_yield", "y"),
    ("ebitda", "j4"),
    ("eps", "e"),
    ("eps_estimate_current_year", "e7"),
    ("eps_estimate_next_quarter", "e9"),
    ("eps_estimate_next_year", "e8"),
    ("ex_dividend_date", "q"),
    ("float_shares", "f6"),
    ("high_limit", "l2"),
    ("holdings_gain", "g4"),
    ("holdings_gain_percent", "g1"),
    ("holdings_gain_percent_realtime", "g5"),
    ("holdings_gain_realtime", "g6"),
    ("holdings_value", "v1"),
    ("holdings_value_realtime", "v7"),
    ("last_trade_date", "d1"),
    ("last_trade_price", "l1"),
    ("last_trade_realtime_time", "k1"),
    ("last_trade_size", "k3"),
    ("last_trade_time", "t1"),
    ("last_trade_time_plus", "l"),
    ("low_limit", "l3"),
    ("market_cap", "j1"),
    ("market_cap_realtime", "j3"),
    ("more_info", "v"),
    ("notes", "n4"),
    ("order_book_realtime", "i5"),
    ("pe", "r"),
    ("pe_realtime", "r2"),
    ("peg", "r5"),
    ("percent_change_200_sma", "m6"),
    ("percent_change_50_sma", "m8"),
    ("percent_change_from_52_week_high", "k5"),
    ("percent_change_from_52_week_low", "j6"),
    ("previous_close", "p"),
    ("price_book", "p6"),
    ("price_eps_estimate_current_year", "r6"),
    ("price_eps_estimate_next_year", "r7"),
    ("price_paid", "p1"),
    ("price_sales", "p5"),
    ("revenue", "s6"),
    ("shares_outstanding", "j2"),
    ("shares_owned", "s1"),
    ("short_ratio", "s7"),
    ("stock_exchange", "x"),
    ("ticker_trend", "t7"),
    ("today_open", "o"),
    ("todays_high", "h"),
    ("todays_low", "g"),
    ("todays_range", "m"),
    ("todays_range_realtime", "m2"),
    ("todays_value_change", "w1"),
    ("todays_value_change_realtime", "w4"),
    ("trade_date", "d2"),
    ("trade_links", "t6"),
    ("volume", "v"),
];

static STANDARD: LazyLock<Arc<TagCatalog>> =
    LazyLock::new(|| Arc::new(TagCatalog::new(STANDARD_TAGS.iter().copied())));

/// Одна запись справочника
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    /// имя поля, например `previous_close`
    pub name: String,
    /// код тега, например `p`
    pub code: String,
}

/// Результат разрешения идентификатора поля
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// имя поля или [`UNKNOWN_FIELD`]
    pub name: String,
    /// код, который уйдёт в запрос
    pub code: String,
}

impl ResolvedField {
    /// Удалось ли сопоставить идентификатор записи справочника
    pub fn is_known(&self) -> bool {
        self.name != UNKNOWN_FIELD
    }
}

/// Неизменяемый двунаправленный справочник тегов.
///
/// Порядок разрешения идентификатора:
/// 1. точное совпадение с именем поля;
/// 2. точное совпадение с кодом (при коллизии кодов берётся первая запись в порядке таблицы);
/// 3. иначе идентификатор уходит в запрос как есть.
///
/// Регистр не нормализуется.
#[derive(Debug, Clone)]
pub struct TagCatalog {
    entries: Vec<TagEntry>,
    by_name: HashMap<String, usize>,
    by_code: HashMap<String, usize>,
}

impl Default for TagCatalog {
    fn default() -> Self {
        (**STANDARD).clone()
    }
}

impl TagCatalog {
    /// Строит справочник из пар `(имя, код)`. Повтор имени игнорируется.
    pub fn new<I, N, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        let mut entries = Vec::new();
        let mut by_name = HashMap::new();
        let mut by_code = HashMap::new();

        for (name, code) in pairs {
            let name = name.into();
            let code = code.into();
            if by_name.contains_key(&name) {
                continue;
            }

            let idx = entries.len();
            by_name.insert(name.clone(), idx);
            // первая запись с этим кодом выигрывает
            by_code.entry(code.clone()).or_insert(idx);
            entries.push(TagEntry { name, code });
        }

        Self {
            entries,
            by_name,
            by_code,
        }
    }

    /// Общий для процесса стандартный справочник
    pub fn standard() -> Arc<TagCatalog> {
        STANDARD.clone()
    }

    /// Код тега по имени поля
    pub fn code_of(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|&idx| self.entries[idx].code.as_str())
    }

    /// Имя первого поля с данным кодом
    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.by_code
            .get(code)
            .map(|&idx| self.entries[idx].name.as_str())
    }

    /// Идентификатор -> код. Неизвестные идентификаторы возвращаются без изменений.
    pub fn resolve<'a>(&'a self, identifier: &'a str) -> &'a str {
        self.code_of(identifier).unwrap_or(identifier)
    }

    /// Идентификатор -> (имя, код) с тем же порядком приоритетов, что и [`TagCatalog::resolve`].
    pub fn resolve_field(&self, identifier: &str) -> ResolvedField {
        if let Some(code) = self.code_of(identifier) {
            return ResolvedField {
                name: identifier.to_string(),
                code: code.to_string(),
            };
        }

        if let Some(name) = self.name_of(identifier) {
            return ResolvedField {
                name: name.to_string(),
                code: identifier.to_string(),
            };
        }

        ResolvedField {
            name: UNKNOWN_FIELD.to_string(),
            code: identifier.to_string(),
        }
    }

    /// Все записи в порядке таблицы
    pub fn iter(&self) -> impl Iterator<Item = &TagEntry> {
        self.entries.iter()
    }

    /// Число записей
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Пуст ли справочник
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Делит склеенную строку тегов на позиции.
///
/// Каждый нецифровой символ начинает новый тег, цифры дописываются к текущему:
/// `"np1v"` -> `["n", "p1", "v"]`.
pub fn split_tag_string(tag_string: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;

    for (i, ch) in tag_string.char_indices() {
        if ch.is_ascii_digit() && start.is_some() {
            continue;
        }
        if let Some(s) = start {
            out.push(&tag_string[s..i]);
        }
        start = Some(i);
    }

    if let Some(s) = start {
        out.push(&tag_string[s..]);
    }

    out
}
