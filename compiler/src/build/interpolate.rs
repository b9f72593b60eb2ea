//! Interpolation Pass
//!
//! Expands `<%= expr %>` and `<%- expr %>` blocks in source text
//! using the build context. This runs before the template
//! compiler sees any text; its output is plain source again.
//!

use super::config::BuildContext;
use super::error::BuildError;
use super::expression::{self, Expression, Segment};
use super::helpers;
use crate::patterns::DELIMITER;
use serde_json::Value;

// ------------------------------------------------------------- Public Functions

/// Replaces every interpolation block in `text`. `<%=` inserts
/// the rendered value, `<%-` inserts it HTML-escaped, and a bare
/// `<%` evaluate block is rejected.
///
pub fn render(text: &str, ctx: &BuildContext) -> Result<String, BuildError> {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;

    for caps in DELIMITER.captures_iter(text) {
        let (Some(whole), Some(mode), Some(body)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };

        out.push_str(&text[copied..whole.start()]);
        copied = whole.end();

        let rendered = match mode.as_str() {
            "=" => to_text(&evaluate(&expression::parse(body.as_str())?, ctx)?),
            "-" => escape_html(&to_text(&evaluate(&expression::parse(body.as_str())?, ctx)?)),
            _ => return Err(BuildError::Evaluate(body.as_str().to_string())),
        };

        out.push_str(&rendered);
    }

    out.push_str(&text[copied..]);
    Ok(out)
}

/// Evaluates a parsed expression. Unknown top-level names are
/// errors; missing nested properties evaluate to null.
///
pub fn evaluate(expr: &Expression, ctx: &BuildContext) -> Result<Value, BuildError> {
    match expr {
        Expression::Literal(value) => Ok(value.clone()),
        Expression::Path { root, segments } => {
            let mut value = ctx
                .data()
                .get(root)
                .cloned()
                .ok_or_else(|| BuildError::Undefined(root.clone()))?;

            for segment in segments {
                value = property(value, segment)?;
            }

            Ok(value)
        }
        Expression::Call { name, args } => {
            let args = args
                .iter()
                .map(|arg| evaluate(arg, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            helpers::call(name, &args, ctx)
        }
    }
}

/// Renders a value the way string concatenation in JavaScript
/// would, except that objects become compact JSON.
///
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(int), _) => int.to_string(),
            (None, Some(float)) if float == 0.0 => "0".to_string(),
            (None, Some(float)) if float.fract() == 0.0 && float.abs() < 1e21 => {
                format!("{:.0}", float)
            }
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(to_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Escapes the five HTML-significant characters.
///
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

// ------------------------------------------------------------- Private Functions

/// Reads one path segment from `value`. Arrays and strings also
/// answer `length`. Strings are indexed by UTF-16 code unit; a
/// lone surrogate reads as U+FFFD.
///
fn property(value: Value, segment: &Segment) -> Result<Value, BuildError> {
    match (value, segment) {
        (Value::Null, segment) => Err(BuildError::Property {
            property: segment_name(segment),
            value: "null".to_string(),
        }),
        (Value::Object(mut map), Segment::Key(key)) => Ok(map.remove(key).unwrap_or(Value::Null)),
        (Value::Array(items), Segment::Key(key)) if key == "length" => Ok(Value::from(items.len())),
        (Value::Array(mut items), Segment::Index(i)) if *i < items.len() => Ok(items.swap_remove(*i)),
        (Value::String(s), Segment::Key(key)) if key == "length" => {
            Ok(Value::from(s.encode_utf16().count()))
        }
        (Value::String(s), Segment::Index(i)) => Ok(s
            .encode_utf16()
            .nth(*i)
            .map(|unit| {
                let c = char::decode_utf16([unit])
                    .next()
                    .and_then(Result::ok)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                Value::String(c.to_string())
            })
            .unwrap_or(Value::Null)),
        _ => Ok(Value::Null),
    }
}

fn segment_name(segment: &Segment) -> String {
    match segment {
        Segment::Key(key) => key.clone(),
        Segment::Index(i) => i.to_string(),
    }
}

// ------------------------------------------------------------- Unit Tests
