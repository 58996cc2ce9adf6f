//! Cell coercions.
//!
//! Every function here is total: malformed input degrades to an empty or
//! zero value and is reported later by validation.

use super::CellValue;

/// Largest inclusive span an `a-b` range token may expand to.
pub const MAX_RANGE_SPAN: i64 = 10_000;

/// Parses a trimmed numeric token. Empty and non-finite values are `None`.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numeric cell value, `0.0` when the cell is not a number.
pub fn coerce_number(cell: &CellValue) -> f64 {
    match cell {
        CellValue::Number(n) if n.is_finite() => *n,
        CellValue::Bool(true) => 1.0,
        CellValue::Text(s) => parse_number(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Like [`coerce_number`], but blank cells stay absent.
pub fn coerce_optional_number(cell: &CellValue) -> Option<f64> {
    if cell.is_blank() {
        None
    } else {
        Some(coerce_number(cell))
    }
}

/// Trimmed text rendering of a cell.
pub fn coerce_string(cell: &CellValue) -> String {
    cell.to_string().trim().to_string()
}

/// Trimmed text, `None` when blank.
pub fn coerce_optional_string(cell: &CellValue) -> Option<String> {
    Some(coerce_string(cell)).filter(|s| !s.is_empty())
}

/// Coerces a cell into a list of trimmed, non-empty strings.
///
/// Arrays are taken as-is; `[...]` text is decoded as a JSON array, falling
/// back to comma splitting when it is not valid JSON.
pub fn parse_list(cell: &CellValue) -> Vec<String> {
    match cell {
        CellValue::Null => Vec::new(),
        CellValue::List(items) => items
            .iter()
            .map(|c| c.to_string().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        other => parse_list_str(&other.to_string()),
    }
}

/// Text form of [`parse_list`].
pub fn parse_list_str(s: &str) -> Vec<String> {
    let s = s.trim();
    if s.is_empty() {
        return Vec::new();
    }
    if s.starts_with('[') && s.ends_with(']') {
        if let Ok(serde_json::Value::Array(items)) = serde_json::from_str(s) {
            return items
                .into_iter()
                .map(|v| match v {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }
    s.split(',')
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(str::to_string)
        .collect()
}

/// Coerces a cell into a list of finite numbers.
///
/// Accepts everything [`parse_list`] accepts, plus a single unbracketed
/// `a-b` token which expands to every integer between `a` and `b`
/// inclusive. Unparsable entries are dropped.
pub fn parse_number_list(cell: &CellValue) -> Vec<f64> {
    match cell {
        CellValue::Null => Vec::new(),
        CellValue::Number(n) => Some(*n).filter(|n| n.is_finite()).into_iter().collect(),
        CellValue::List(items) => items.iter().filter_map(cell_number).collect(),
        other => parse_number_list_str(&other.to_string()),
    }
}

/// Text form of [`parse_number_list`].
pub fn parse_number_list_str(s: &str) -> Vec<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Vec::new();
    }
    if s.contains('-') && !s.contains('[') {
        if let Some(range) = expand_range(s) {
            return range;
        }
    }
    if s.starts_with('[') && s.ends_with(']') {
        if let Ok(serde_json::Value::Array(items)) = serde_json::from_str(s) {
            return items.iter().filter_map(json_number).collect();
        }
    }
    s.split(',').filter_map(parse_number).collect()
}

/// Decodes an embedded JSON cell. Blank or unparsable cells are `None`.
pub fn parse_json(cell: &CellValue) -> Option<serde_json::Value> {
    match cell {
        CellValue::Null => None,
        CellValue::Text(s) if s.trim().is_empty() => None,
        CellValue::Text(s) => serde_json::from_str(s).ok(),
        other => Some(serde_json::Value::from(other.clone())),
    }
}

fn expand_range(s: &str) -> Option<Vec<f64>> {
    let (a, b) = s.split_once('-')?;
    if b.contains('-') {
        return None;
    }
    let (a, b) = (parse_number(a)?, parse_number(b)?);
    if a.fract() != 0.0 || b.fract() != 0.0 {
        return None;
    }
    let (lo, hi) = (a.min(b) as i64, a.max(b) as i64);
    if hi - lo > MAX_RANGE_SPAN {
        return None;
    }
    Some((lo..=hi).map(|p| p as f64).collect())
}

fn cell_number(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
        CellValue::Text(s) => parse_number(s),
        _ => None,
    }
}

fn json_number(v: &serde_json::Value) -> Option<f64> {
    match v {
        serde_json::Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        serde_json::Value::String(s) => parse_number(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_list_range_expansion() {
        assert_eq!(parse_number_list_str("1-3"), vec![1.0, 2.0, 3.0]);
        assert_eq!(parse_number_list_str("5-3"), vec![3.0, 4.0, 5.0]);
        assert_eq!(parse_number_list_str(" 2 - 2 "), vec![2.0]);
    }

    #[test]
    fn test_number_list_bracketed_and_comma() {
        assert_eq!(parse_number_list_str("[1,3,5]"), vec![1.0, 3.0, 5.0]);
        assert_eq!(parse_number_list_str("2,4"), vec![2.0, 4.0]);
        assert_eq!(parse_number_list_str("[1, \"2\", \"x\"]"), vec![1.0, 2.0]);
    }

    #[test]
    fn test_number_list_drops_garbage() {
        assert_eq!(parse_number_list_str("1,abc,,3"), vec![1.0, 3.0]);
        assert_eq!(parse_number_list_str("inf,2"), vec![2.0]);
        assert!(parse_number_list_str("").is_empty());
        // Unclosed bracket: plain comma split, so "[1" is dropped.
        assert_eq!(parse_number_list_str("[1,2"), vec![2.0]);
        // Bracketed but not JSON: comma split drops both halves.
        assert!(parse_number_list_str("[1,x]").is_empty());
        assert_eq!(parse_number_list_str("-2"), vec![-2.0]);
    }

    #[test]
    fn test_number_list_range_guards() {
        // Fractional bounds and multi-dash tokens are not ranges.
        assert!(parse_number_list_str("1.5-3").is_empty());
        assert!(parse_number_list_str("1-2-3").is_empty());
        assert!(parse_number_list_str("1-100000").is_empty());
    }

    #[test]
    fn test_number_list_from_cells() {
        assert_eq!(parse_number_list(&CellValue::Number(4.0)), vec![4.0]);
        assert_eq!(
            parse_number_list(&CellValue::List(vec![1.0.into(), "2".into(), CellValue::Null])),
            vec![1.0, 2.0]
        );
        assert_eq!(parse_number_list(&"1-3".into()), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list_str("a, b ,,c"), vec!["a", "b", "c"]);
        assert_eq!(parse_list_str(r#"["x", " y ", ""]"#), vec!["x", "y"]);
        assert_eq!(parse_list_str("[broken, json]"), vec!["[broken", "json]"]);
        assert_eq!(
            parse_list(&CellValue::List(vec![" a ".into(), 2.0.into()])),
            vec!["a", "2"]
        );
        assert_eq!(parse_list(&CellValue::Number(7.0)), vec!["7"]);
        assert!(parse_list(&CellValue::Null).is_empty());
    }

    #[test]
    fn test_coerce_number_defaults_to_zero() {
        assert_eq!(coerce_number(&"3".into()), 3.0);
        assert_eq!(coerce_number(&" 2.5 ".into()), 2.5);
        assert_eq!(coerce_number(&"high".into()), 0.0);
        assert_eq!(coerce_number(&CellValue::Null), 0.0);
        assert_eq!(coerce_optional_number(&"".into()), None);
        assert_eq!(coerce_optional_number(&"x".into()), Some(0.0));
    }

    #[test]
    fn test_parse_json() {
        assert_eq!(
            parse_json(&r#"{"a":1}"#.into()).unwrap()["a"],
            serde_json::json!(1)
        );
        assert!(parse_json(&"{bad".into()).is_none());
        assert!(parse_json(&"  ".into()).is_none());
        assert!(parse_json(&CellValue::Null).is_none());
    }
}
