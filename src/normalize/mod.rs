//! Format-specific extractors turning raw upstream payloads into
//! canonical records.
//!
//! Each endpoint has its own entry point; the strategy is chosen by call
//! site, never by sniffing the payload shape. Optional fields are
//! default-safe: one field failing to extract never aborts the rest.

pub mod script;

use chrono::{TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::DataError;
use crate::model::{
    DetailRecord, FundManager, HistoryPoint, RankEntry, SearchResult, ValuationRecord,
};

/// Strips a known callback wrapper: `<callback>(<body>);` → `<body>`.
pub fn unwrap_callback<'a>(raw: &'a str, callback: &str) -> Result<&'a str, DataError> {
    let trimmed = raw.trim();
    let rest = trimmed
        .strip_prefix(callback)
        .ok_or_else(|| DataError::Parse(format!("missing `{callback}` callback wrapper")))?
        .trim_start();
    let rest = rest
        .strip_prefix('(')
        .ok_or_else(|| DataError::Parse(format!("missing opening paren after `{callback}`")))?;
    rest.trim_end()
        .trim_end_matches(';')
        .trim_end()
        .strip_suffix(')')
        .ok_or_else(|| DataError::Parse(format!("missing closing paren for `{callback}`")))
}

/// Strips an arbitrary callback wrapper when present; bare JSON passes
/// through untouched. Used for endpoints whose callback token drifts.
fn strip_any_callback(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed;
    }
    if let Some(open) = trimmed.find('(') {
        let head = &trimmed[..open];
        if !head.is_empty()
            && head
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '.')
        {
            let inner = trimmed[open + 1..]
                .trim_end()
                .trim_end_matches(';')
                .trim_end();
            if let Some(inner) = inner.strip_suffix(')') {
                return inner;
            }
        }
    }
    trimmed
}

/// Splits a comma-delimited flat record into exactly `n` positional
/// fields; missing trailing fields map to empty strings.
fn split_fields(record: &str, n: usize) -> Vec<String> {
    let mut fields: Vec<String> = record.split(',').map(str::to_string).collect();
    fields.resize(n, String::new());
    fields
}

fn plain_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn millis_to_date(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// -------- Real-time valuation (callback-wrapped JSON) --------

#[derive(Debug, Deserialize)]
struct GzValuation {
    #[serde(default)]
    fundcode: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    jzrq: Option<String>,
    #[serde(default)]
    dwjz: Option<String>,
    #[serde(default)]
    gsz: Option<String>,
    #[serde(default)]
    gszzl: Option<String>,
    #[serde(default)]
    gztime: Option<String>,
}

/// Normalizes one real-time valuation payload, `jsonpgz({...});`.
pub fn valuation(raw: &str) -> Result<ValuationRecord, DataError> {
    let body = unwrap_callback(raw, "jsonpgz")?;
    let v: GzValuation = serde_json::from_str(body)
        .map_err(|e| DataError::Parse(format!("valuation body is not valid JSON: {e}")))?;

    Ok(ValuationRecord {
        code: v.fundcode.unwrap_or_default(),
        name: v.name.unwrap_or_default(),
        nav_date: v.jzrq.unwrap_or_default(),
        nav: v.dwjz.unwrap_or_default(),
        estimate_value: v.gsz.unwrap_or_default(),
        estimate_change_pct: v.gszzl.unwrap_or_default(),
        estimate_time: v.gztime.unwrap_or_default(),
    })
}

// -------- Search (delimited strings or typed objects) --------

#[derive(Debug, Deserialize)]
struct TypedSearchItem {
    #[serde(default, alias = "CODE", alias = "fundcode")]
    code: Option<String>,
    #[serde(default, alias = "NAME", alias = "shortname")]
    name: Option<String>,
    #[serde(default, alias = "FundType", alias = "FTYPE", alias = "fundtype")]
    fund_type: Option<String>,
    #[serde(default, alias = "PINYIN", alias = "abbname")]
    pinyin: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SearchPayload {
    Wrapped {
        #[serde(alias = "Datas")]
        datas: Vec<Value>,
    },
    Typed(Vec<TypedSearchItem>),
}

fn search_result_from_delimited(record: &str) -> SearchResult {
    let f = split_fields(record, 4);
    SearchResult {
        code: f[0].clone(),
        name: f[1].clone(),
        fund_type: f[2].clone(),
        pinyin: f[3].clone(),
    }
}

fn search_result_from_typed(item: TypedSearchItem) -> SearchResult {
    SearchResult {
        code: item.code.unwrap_or_default(),
        name: item.name.unwrap_or_default(),
        fund_type: item.fund_type.unwrap_or_default(),
        pinyin: item.pinyin.unwrap_or_default(),
    }
}

/// Normalizes a search payload. The endpoint has shipped both a wrapped
/// object with a `Datas` array of comma-delimited strings and, later, a
/// bare array of typed objects with renamed fields; both channels are
/// declared here rather than sniffed at runtime.
pub fn search_results(raw: &str) -> Result<Vec<SearchResult>, DataError> {
    let body = strip_any_callback(raw);
    let payload: SearchPayload = serde_json::from_str(body)
        .map_err(|e| DataError::Parse(format!("search body is not valid JSON: {e}")))?;

    let results = match payload {
        SearchPayload::Wrapped { datas } => datas
            .into_iter()
            .map(|item| match item {
                Value::String(record) => search_result_from_delimited(&record),
                other => serde_json::from_value::<TypedSearchItem>(other)
                    .map(search_result_from_typed)
                    .unwrap_or_default(),
            })
            .collect(),
        SearchPayload::Typed(items) => items.into_iter().map(search_result_from_typed).collect(),
    };
    Ok(results)
}

// -------- Historical NAV (paged JSON endpoint) --------

#[derive(Debug, Deserialize)]
struct LsjzItem {
    #[serde(default, alias = "FSRQ")]
    fsrq: Option<String>,
    #[serde(default, alias = "DWJZ")]
    dwjz: Option<String>,
    #[serde(default, alias = "LJJZ")]
    ljjz: Option<String>,
    #[serde(default, alias = "JZZZL")]
    jzzzl: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LsjzData {
    #[serde(default, alias = "LSJZList")]
    lsjz_list: Vec<LsjzItem>,
}

#[derive(Debug, Deserialize)]
struct LsjzResponse {
    #[serde(default, alias = "Data")]
    data: Option<LsjzData>,
    #[serde(default, alias = "TotalCount")]
    total_count: Option<usize>,
}

/// Normalizes one page of the history endpoint. Returns the page's
/// points (most recent first, as served) and the reported total count.
pub fn history_page(raw: &str) -> Result<(Vec<HistoryPoint>, usize), DataError> {
    let body = strip_any_callback(raw);
    let response: LsjzResponse = serde_json::from_str(body)
        .map_err(|e| DataError::Parse(format!("history body is not valid JSON: {e}")))?;

    let points: Vec<HistoryPoint> = response
        .data
        .unwrap_or_default()
        .lsjz_list
        .into_iter()
        .map(|item| HistoryPoint {
            date: item.fsrq.unwrap_or_default(),
            nav: item.dwjz.unwrap_or_default(),
            accumulated_nav: item.ljjz.unwrap_or_default(),
            daily_change_pct: item.jzzzl.unwrap_or_default(),
        })
        .collect();
    let total = response.total_count.unwrap_or(points.len());
    Ok((points, total))
}

// -------- Detail script blob (embedded `var` declarations) --------

/// Extracts the embedded net-worth series from a detail blob,
/// chronological as declared upstream.
pub fn net_worth_trend(blob: &str) -> Vec<HistoryPoint> {
    script::extract_array(blob, "Data_netWorthTrend")
        .iter()
        .map(|point| HistoryPoint {
            date: point
                .get("x")
                .and_then(Value::as_i64)
                .map(millis_to_date)
                .unwrap_or_default(),
            nav: plain_string(point.get("y")),
            accumulated_nav: String::new(),
            daily_change_pct: plain_string(point.get("equityReturn")),
        })
        .collect()
}

fn manager_from_value(value: &Value) -> FundManager {
    FundManager {
        id: plain_string(value.get("id")),
        name: plain_string(value.get("name")),
        star: plain_string(value.get("star")),
        tenure: plain_string(value.get("workTime")),
    }
}

fn split_code_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Assembles the static part of a detail record from a script blob.
///
/// Each field is one independent extraction; a missing or malformed
/// declaration yields that field's empty default and the rest proceed.
/// The valuation overlay is merged by the service afterwards.
pub fn detail_record(blob: &str) -> DetailRecord {
    let managers = script::extract_array(blob, "Data_currentFundManager")
        .iter()
        .map(manager_from_value)
        .collect();
    let stock_holdings = script::extract_array(blob, "stockCodes")
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();
    let bond_holdings = split_code_list(&script::extract_string(blob, "zqCodes"));

    DetailRecord {
        valuation: ValuationRecord {
            code: script::extract_string(blob, "fS_code"),
            name: script::extract_string(blob, "fS_name"),
            ..Default::default()
        },
        source_rate: script::extract_string(blob, "fund_sourceRate"),
        rate: script::extract_string(blob, "fund_Rate"),
        min_purchase: script::extract_string(blob, "fund_minsg"),
        // Upstream suffixes are Chinese units: `_1y` is one month,
        // `_1n` one year.
        yield_1m: script::extract_string(blob, "syl_1y"),
        yield_3m: script::extract_string(blob, "syl_3y"),
        yield_6m: script::extract_string(blob, "syl_6y"),
        yield_1y: script::extract_string(blob, "syl_1n"),
        managers,
        stock_holdings,
        bond_holdings,
        net_worth_trend: net_worth_trend(blob),
    }
}

// -------- Rank listing (script-embedded delimited records) --------

fn rank_entry_from_delimited(record: &str) -> RankEntry {
    let f = split_fields(record, 12);
    RankEntry {
        code: f[0].clone(),
        name: f[1].clone(),
        nav_date: f[3].clone(),
        nav: f[4].clone(),
        day_change_pct: f[6].clone(),
        week_change_pct: f[7].clone(),
        month_change_pct: f[8].clone(),
        three_month_change_pct: f[9].clone(),
        six_month_change_pct: f[10].clone(),
        year_change_pct: f[11].clone(),
    }
}

/// Normalizes a rank payload: `var rankData = [...]` of comma-delimited
/// records, or the evolved object form carrying a `datas` array. This
/// format is fragile to upstream column reordering; best-effort only.
pub fn rank_entries(raw: &str) -> Vec<RankEntry> {
    let mut rows = script::extract_array(raw, "rankData");
    if rows.is_empty()
        && let Some(value) = script::extract_json(raw, "rankData")
        && let Some(datas) = value.get("datas").and_then(Value::as_array)
    {
        rows = datas.clone();
    }
    if rows.is_empty() {
        debug!("rank payload yielded no rows");
    }
    rows.iter()
        .filter_map(Value::as_str)
        .map(rank_entry_from_delimited)
        .collect()
}
