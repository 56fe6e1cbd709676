//! Turns generator output into the text fed to a program's stdin.
//!
//! A generator returns an arbitrary JSON-like [`Value`]. A top-level array is
//! rendered one element at a time, each element classified on its own:
//!
//! - an array whose first entry is an array is a matrix, one line per row;
//! - an array whose first entry is a string is a block of pre-formatted lines;
//! - anything else is a single line, space-joined if it is an array.
//!
//! Lines are joined with `\n` and no trailing newline is added.

#![warn(missing_docs)]

use serde_json::Value;

/// Formats a generator value as program input.
pub fn format(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Array(items) => {
            let mut lines = Vec::new();
            for item in items {
                push_lines(item, &mut lines);
            }
            lines.join("\n")
        }
        scalar => stringify(scalar),
    }
}

fn push_lines(item: &Value, lines: &mut Vec<String>) {
    let Value::Array(members) = item else {
        lines.push(stringify(item));
        return;
    };
    match members.first() {
        Some(Value::Array(_)) => {
            for row in members {
                lines.push(join_row(row));
            }
        }
        Some(Value::String(_)) => {
            lines.extend(members.iter().map(stringify));
        }
        _ => lines.push(join_row(item)),
    }
}

/// Space-joins an array's cells, or stringifies a lone scalar.
fn join_row(row: &Value) -> String {
    match row {
        Value::Array(cells) => cells.iter().map(stringify).collect::<Vec<_>>().join(" "),
        other => stringify(other),
    }
}

/// Renders one scalar.
///
/// Integral floats drop their fractional part (`3.0` renders as `3`), and a
/// nested array inside a cell renders comma-joined. Objects render as compact
/// JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(float_to_string).unwrap_or_default()
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Shortest round-trip rendering with JavaScript's exponent cutoffs:
/// magnitudes from `1e-6` up to (not including) `1e21` print in positional
/// notation, anything else as `1e+21` / `1.5e-7`.
fn float_to_string(f: f64) -> String {
    let magnitude = f.abs();
    if f == 0.0 || (1e-6..1e21).contains(&magnitude) {
        // f64's Display never prints a trailing ".0".
        return f.to_string();
    }
    let exp = format!("{f:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extreme_floats_use_exponent_notation() {
        assert_eq!(stringify(&json!(1e21)), "1e+21");
        assert_eq!(stringify(&json!(1.5e300)), "1.5e+300");
        assert_eq!(stringify(&json!(-2e22)), "-2e+22");
        assert_eq!(stringify(&json!(1e20)), "100000000000000000000");
        assert_eq!(stringify(&json!(0.000001)), "0.000001");
        assert_eq!(stringify(&json!(1e-7)), "1e-7");
        assert_eq!(stringify(&json!(-2.5e-8)), "-2.5e-8");
    }

    #[test]
    fn null_is_empty() {
        assert_eq!(format(&Value::Null), "");
    }

    #[test]
    fn top_level_scalars() {
        assert_eq!(format(&json!(42)), "42");
        assert_eq!(format(&json!(-7)), "-7");
        assert_eq!(format(&json!(2.5)), "2.5");
        assert_eq!(format(&json!(3.0)), "3");
        assert_eq!(format(&json!("hello world")), "hello world");
        assert_eq!(format(&json!(true)), "true");
    }

    #[test]
    fn scalar_row_is_one_line() {
        assert_eq!(format(&json!([[1, 2, 3]])), "1 2 3");
        assert_eq!(format(&json!([[1, "x", 2.5]])), "1 x 2.5");
    }

    #[test]
    fn matrix_expands_to_rows() {
        let value = json!([[[1, 2], [3, 4], [5, 6]]]);
        assert_eq!(format(&value), "1 2\n3 4\n5 6");
    }

    #[test]
    fn string_block_is_spliced() {
        assert_eq!(format(&json!([["l1", "l2"]])), "l1\nl2");
        assert_eq!(format(&json!([["a b", "c"], [1]])), "a b\nc\n1");
    }

    #[test]
    fn empty_edge_cases() {
        assert_eq!(format(&json!([])), "");
        assert_eq!(format(&json!([[]])), "");
        assert_eq!(format(&json!([[], []])), "\n");
        assert_eq!(format(&json!([[1, 2], [], [3, 4]])), "1 2\n\n3 4");
    }

    #[test]
    fn elements_classified_independently() {
        let value = json!([
            [3],
            [[1, 2], [3, 4]],
            ["raw line"],
            7,
            [5, 6]
        ]);
        assert_eq!(format(&value), "3\n1 2\n3 4\nraw line\n7\n5 6");
    }

    #[test]
    fn typical_test_case_layout() {
        // n, then an array, then an n x 2 matrix of edges.
        let value = json!([[3], [10, 20, 30], [[1, 2], [2, 3]]]);
        assert_eq!(format(&value), "3\n10 20 30\n1 2\n2 3");
    }

    #[test]
    fn no_trailing_newline() {
        assert!(!format(&json!([[1], [2]])).ends_with('\n'));
    }

    #[test]
    fn nested_cell_is_comma_joined() {
        assert_eq!(format(&json!([[1, [2, 3]]])), "1 2,3");
    }

    #[test]
    fn large_integers_keep_precision() {
        assert_eq!(format(&json!([[u64::MAX, i64::MIN]])), format!("{} {}", u64::MAX, i64::MIN));
    }
}
