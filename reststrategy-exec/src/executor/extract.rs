use serde_json::Value as JsonValue;
use serde_json_path::JsonPath;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid JSONPath expression {expr}: {message}")]
    InvalidExpression { expr: String, message: String },
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("cannot use type: {0} in further processing - can only be a numeric or string value")]
    UnsupportedType(&'static str),
}

/// Apply `expr` to a response body and return the first match as text.
///
/// The body may be a JSON document or a JSON string that itself encodes a document. An empty
/// expression, an empty body, and a query without matches all yield `""`.
pub fn find_by_json_path(body: &[u8], expr: &str) -> Result<String, ExtractError> {
    Ok(match find_scalar(body, expr)? {
        Some(JsonValue::Number(n)) => n.to_string(),
        Some(JsonValue::String(s)) => s,
        _ => String::new(),
    })
}

/// Like [`find_by_json_path`], but keeps the JSON type of the match. Only strings and numbers
/// come back; an empty string is folded into `None`.
pub(crate) fn find_scalar(body: &[u8], expr: &str) -> Result<Option<JsonValue>, ExtractError> {
    let expr = expr.trim();
    if expr.is_empty() || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let doc = parse_body(body)?;
    let path = JsonPath::parse(&normalize_expr(expr)).map_err(|e| ExtractError::InvalidExpression {
        expr: expr.to_string(),
        message: e.to_string(),
    })?;

    let nodes = path.query(&doc).all();
    match nodes.first() {
        None => Ok(None),
        Some(v) => scalar(v),
    }
}

fn parse_body(body: &[u8]) -> Result<JsonValue, ExtractError> {
    let doc: JsonValue =
        serde_json::from_slice(body).map_err(|e| ExtractError::InvalidJson(e.to_string()))?;
    // One layer of string quoting around an encoded document is unwrapped.
    if let JsonValue::String(inner) = &doc {
        if let Ok(unwrapped) = serde_json::from_str::<JsonValue>(inner) {
            return Ok(unwrapped);
        }
    }
    Ok(doc)
}

fn scalar(v: &JsonValue) -> Result<Option<JsonValue>, ExtractError> {
    match v {
        JsonValue::String(s) if s.is_empty() => Ok(None),
        JsonValue::String(_) | JsonValue::Number(_) => Ok(Some(v.clone())),
        JsonValue::Object(_) => Err(ExtractError::UnsupportedType("object")),
        JsonValue::Array(_) => Err(ExtractError::UnsupportedType("array")),
        JsonValue::Null => Err(ExtractError::UnsupportedType("null")),
        JsonValue::Bool(_) => Err(ExtractError::UnsupportedType("bool")),
    }
}

/// Rewrite the `.[` spelling (`$.[0]`, `$.[?(...)]`) to the bracket form RFC 9535 accepts.
/// Quoted string literals are left untouched.
fn normalize_expr(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut quote: Option<char> = None;
    let mut chars = expr.chars().peekable();
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == q {
                    quote = None;
                }
            }
            None => {
                if c == '\'' || c == '"' {
                    quote = Some(c);
                    out.push(c);
                } else if c == '.' && chars.peek() == Some(&'[') {
                    continue;
                } else {
                    out.push(c);
                }
            }
        }
    }
    out
}
