use std::collections::BTreeMap;

const REDACTED: &str = "<redacted>";

#[derive(Debug, Clone)]
pub struct RedactedHeaders {
    pub headers: BTreeMap<String, String>,
}

impl std::fmt::Display for RedactedHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (k, v) in &self.headers {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{k}: {v}")?;
        }
        Ok(())
    }
}

/// Copy of `headers` safe for logs: `Authorization`, `Cookie` and every auth-derived header
/// name in `credential_headers` are masked.
pub fn redact_headers(
    headers: &BTreeMap<String, String>,
    credential_headers: &[String],
) -> RedactedHeaders {
    let mut out = headers.clone();
    mask_case_insensitive(&mut out, "authorization");
    mask_case_insensitive(&mut out, "cookie");
    for name in credential_headers {
        mask_case_insensitive(&mut out, name);
    }
    RedactedHeaders { headers: out }
}

fn mask_case_insensitive(map: &mut BTreeMap<String, String>, header: &str) {
    for (k, v) in map.iter_mut() {
        if k.eq_ignore_ascii_case(header) {
            *v = REDACTED.to_string();
        }
    }
}
