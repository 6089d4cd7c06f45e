//! Scanner for `$name` / `${name}` placeholders.
//!
//! Only names that start with an ASCII letter or `_` are placeholders. Anything else after a
//! `$` (digits, punctuation, a second `$`) is kept verbatim so payloads can carry literal
//! `$1` or `$$` sequences.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Var(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Var(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unclosed placeholder starting at byte {offset} (missing '}}')")]
    UnclosedBrace { offset: usize },
}

pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Strict scan: the first malformed placeholder is an error.
pub fn parse_template(input: &str) -> Result<Template, TemplateError> {
    match parse_template_lenient(input) {
        (tpl, None) => Ok(tpl),
        (_, Some(err)) => Err(err),
    }
}

/// Scan that never fails; a malformed placeholder and everything after it stays literal and
/// the error is returned alongside the template.
pub fn parse_template_lenient(input: &str) -> (Template, Option<TemplateError>) {
    let mut segments = Vec::new();
    let mut buf = String::new();
    let mut error = None;
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < input.len() {
        let ch = bytes[i];
        if ch != b'$' {
            // Copy up to the next `$` in one go; `$` is ASCII so the slice stays on a char boundary.
            let next = input[i..].find('$').map(|n| i + n).unwrap_or(input.len());
            buf.push_str(&input[i..next]);
            i = next;
            continue;
        }

        match bytes.get(i + 1) {
            Some(b'{') => {
                let Some(close) = input[i + 2..].find('}') else {
                    error = Some(TemplateError::UnclosedBrace { offset: i });
                    buf.push_str(&input[i..]);
                    break;
                };
                let name = &input[i + 2..i + 2 + close];
                let end = i + 2 + close + 1;
                if is_identifier(name) {
                    flush(&mut segments, &mut buf);
                    segments.push(Segment::Var(name.to_string()));
                } else {
                    buf.push_str(&input[i..end]);
                }
                i = end;
            }
            Some(c) if c.is_ascii_alphabetic() || *c == b'_' => {
                let start = i + 1;
                let len = input[start..]
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(input.len() - start);
                flush(&mut segments, &mut buf);
                segments.push(Segment::Var(input[start..start + len].to_string()));
                i = start + len;
            }
            _ => {
                buf.push('$');
                i += 1;
            }
        }
    }

    flush(&mut segments, &mut buf);
    (Template { segments }, error)
}

fn flush(segments: &mut Vec<Segment>, buf: &mut String) {
    if !buf.is_empty() {
        segments.push(Segment::Literal(std::mem::take(buf)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Segment {
        Segment::Literal(s.to_string())
    }

    fn var(s: &str) -> Segment {
        Segment::Var(s.to_string())
    }

    #[test]
    fn plain_text_is_a_single_literal() {
        let tpl = parse_template(r#"{"a":1}"#).unwrap();
        assert_eq!(tpl.segments, vec![lit(r#"{"a":1}"#)]);
    }

    #[test]
    fn braced_and_bare_placeholders() {
        let tpl = parse_template(r#"{"v":"${x}","w":$y_2}"#).unwrap();
        assert_eq!(
            tpl.segments,
            vec![lit(r#"{"v":""#), var("x"), lit(r#"","w":"#), var("y_2"), lit("}")]
        );
    }

    #[test]
    fn digit_led_names_stay_literal() {
        let tpl = parse_template("cost $1 and ${2} and $$").unwrap();
        assert_eq!(tpl.segments, vec![lit("cost $1 and ${2} and $$")]);
    }

    #[test]
    fn trailing_dollar_is_literal() {
        let tpl = parse_template("price$").unwrap();
        assert_eq!(tpl.segments, vec![lit("price$")]);
    }

    #[test]
    fn unclosed_brace_keeps_rest_literal() {
        let (tpl, err) = parse_template_lenient("a $b ${c");
        assert_eq!(err, Some(TemplateError::UnclosedBrace { offset: 5 }));
        assert_eq!(tpl.segments, vec![lit("a "), var("b"), lit(" ${c")]);
        assert!(parse_template("${c").is_err());
    }

    #[test]
    fn multibyte_text_around_placeholders() {
        let tpl = parse_template("héllo $name ✓").unwrap();
        assert_eq!(tpl.segments, vec![lit("héllo "), var("name"), lit(" ✓")]);
    }
}
