//! Shell quoting shared by every rendered flag value.

fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
}

/// Backslash-escapes the characters that stay special inside double quotes.
pub fn escape_double(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Always wraps `value` in double quotes.
pub fn double_quote(value: &str) -> String {
    format!("\"{}\"", escape_double(value))
}

/// Leaves `value` bare when the shell would read it back unchanged, double quotes it otherwise.
pub fn quote_arg(value: &str) -> String {
    if !value.is_empty() && value.chars().all(is_safe) {
        value.to_string()
    } else {
        double_quote(value)
    }
}

/// Wraps `value` in single quotes; an embedded `'` becomes `'\''`.
pub fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
