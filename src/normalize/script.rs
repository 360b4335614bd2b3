//! Extraction of `var <name> = <value>;` declarations from script blobs.
//!
//! The scan is boundary-aware: semicolons inside strings or nested
//! structures never terminate a value, and a `;` at top level only ends
//! the value when the next meaningful token is another declaration, a
//! comment, or end-of-input.

use serde_json::Value;

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Confirms that `rest` begins with a declaration boundary.
fn at_declaration_boundary(rest: &str) -> bool {
    let rest = rest.trim_start();
    if rest.is_empty() || rest.starts_with("//") || rest.starts_with("/*") {
        return true;
    }
    match rest.strip_prefix("var") {
        Some(tail) => tail.chars().next().is_some_and(char::is_whitespace),
        None => false,
    }
}

/// Locates the raw value of a `var <name> = <value>;` declaration.
///
/// Returns `None` when the variable is not declared. The returned slice
/// excludes the terminating semicolon.
pub fn extract_var<'a>(blob: &'a str, name: &str) -> Option<&'a str> {
    if name.is_empty() {
        return None;
    }

    let mut search = 0;
    while let Some(pos) = blob[search..].find(name) {
        let idx = search + pos;
        search = idx + name.len();

        // Whole-identifier match only.
        if blob[..idx].chars().next_back().is_some_and(is_ident_char)
            || blob[idx + name.len()..]
                .chars()
                .next()
                .is_some_and(is_ident_char)
        {
            continue;
        }

        // Preceded by the `var` keyword.
        let before = blob[..idx].trim_end();
        let Some(head) = before.strip_suffix("var") else {
            continue;
        };
        if before.len() == blob[..idx].len() || head.chars().next_back().is_some_and(is_ident_char)
        {
            continue;
        }

        // Followed by `=`.
        let after = blob[idx + name.len()..].trim_start();
        let Some(value_and_rest) = after.strip_prefix('=') else {
            continue;
        };

        return Some(scan_value(value_and_rest.trim_start()));
    }
    None
}

/// Scans forward to the end of one declaration value.
fn scan_value(input: &str) -> &str {
    let mut in_str: Option<char> = None;
    let mut escaped = false;
    let mut depth: i32 = 0;

    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if let Some(quote) = in_str {
            if c == '\\' {
                escaped = true;
            } else if c == quote {
                in_str = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => in_str = Some(c),
            '[' | '{' | '(' => depth += 1,
            ']' | '}' | ')' => depth -= 1,
            ';' if depth <= 0 && at_declaration_boundary(&input[i + 1..]) => {
                return input[..i].trim_end();
            }
            _ => {}
        }
    }
    input.trim_end()
}

/// Extracts a string-valued declaration, with surrounding quotes removed.
/// Undeclared or empty values yield an empty string.
pub fn extract_string(blob: &str, name: &str) -> String {
    let Some(value) = extract_var(blob, name) else {
        return String::new();
    };
    let value = value.trim();
    let unquoted = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')));
    unquoted.unwrap_or(value).to_string()
}

/// Extracts a declaration and parses it as JSON.
pub fn extract_json(blob: &str, name: &str) -> Option<Value> {
    extract_var(blob, name).and_then(|v| serde_json::from_str(v.trim()).ok())
}

/// Extracts a JSON-array declaration. A declared but malformed value, or
/// one of the wrong shape (object where array expected), yields an empty
/// list rather than an error.
pub fn extract_array(blob: &str, name: &str) -> Vec<Value> {
    match extract_json(blob, name) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_string_var() {
        let blob = r#"var fS_name = "Example Growth Fund";var fS_code = "000001";"#;
        assert_eq!(extract_string(blob, "fS_name"), "Example Growth Fund");
        assert_eq!(extract_string(blob, "fS_code"), "000001");
    }

    #[test]
    fn test_extract_array_between_declarations() {
        let blob = r#"var Data_netWorthTrend = [{"x":1,"y":"1.234"}];var other = 1;"#;
        let items = extract_array(blob, "Data_netWorthTrend");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["x"], 1);
        assert_eq!(items[0]["y"], "1.234");
        assert_eq!(extract_var(blob, "other"), Some("1"));
    }

    #[test]
    fn test_semicolon_inside_string_does_not_terminate() {
        let blob = r#"var notes = ["a;b", "c"];var next = 2;"#;
        let items = extract_array(blob, "notes");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], "a;b");
    }

    #[test]
    fn test_nested_structures_do_not_terminate_mid_array() {
        let blob = concat!(
            r#"var Data_netWorthTrend = [{"x":1,"y":1.1,"unitMoney":""},"#,
            r#"{"x":2,"y":1.2,"extra":[{"k":"v"}]}];"#,
            r#"var Data_ACWorthTrend = [[1,1.1]];"#
        );
        let items = extract_array(blob, "Data_netWorthTrend");
        assert_eq!(items.len(), 2);
        assert!(items[1]["extra"].is_array());

        let ac = extract_array(blob, "Data_ACWorthTrend");
        assert_eq!(ac.len(), 1);
    }

    #[test]
    fn test_object_where_array_expected_yields_empty() {
        let blob = r#"var Data_netWorthTrend = {"x":1};"#;
        assert!(extract_array(blob, "Data_netWorthTrend").is_empty());
    }

    #[test]
    fn test_malformed_value_yields_empty() {
        let blob = "var Data_netWorthTrend = [{broken;var next = 1;";
        assert!(extract_array(blob, "Data_netWorthTrend").is_empty());
    }

    #[test]
    fn test_missing_var_yields_defaults() {
        let blob = r#"var something = 1;"#;
        assert_eq!(extract_var(blob, "missing"), None);
        assert_eq!(extract_string(blob, "missing"), "");
        assert!(extract_array(blob, "missing").is_empty());
    }

    #[test]
    fn test_name_must_match_whole_identifier() {
        let blob = r#"var syl_1y2 = "9.99";var syl_1y = "1.23";"#;
        assert_eq!(extract_string(blob, "syl_1y"), "1.23");
    }

    #[test]
    fn test_value_at_end_of_input_without_semicolon() {
        let blob = r#"var last = "tail""#;
        assert_eq!(extract_string(blob, "last"), "tail");
    }

    #[test]
    fn test_boundary_comment_accepted() {
        let blob = "var a = [1,2]; /* trailing */";
        let items = extract_array(blob, "a");
        assert_eq!(items.len(), 2);
    }
}
