/// Formats nanoseconds the way Go's `time.Duration` prints them, which is what
/// `docker run --health-*` parses back (`1m30s`, `500ms`, `1h0m0s`).
pub fn go_duration(nanos: i64) -> String {
    if nanos == 0 {
        return "0s".to_string();
    }
    let sign = if nanos < 0 { "-" } else { "" };
    let nanos = nanos.unsigned_abs();

    if nanos < 1_000 {
        return format!("{}{}ns", sign, nanos);
    }
    if nanos < 1_000_000 {
        return format!("{}{}µs", sign, fraction(nanos, 1_000));
    }
    if nanos < 1_000_000_000 {
        return format!("{}{}ms", sign, fraction(nanos, 1_000_000));
    }

    let hours = nanos / 3_600_000_000_000;
    let minutes = nanos / 60_000_000_000 % 60;
    let seconds = fraction(nanos % 60_000_000_000, 1_000_000_000);
    if hours > 0 {
        format!("{}{}h{}m{}s", sign, hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}{}m{}s", sign, minutes, seconds)
    } else {
        format!("{}{}s", sign, seconds)
    }
}

/// `value / unit` with the remainder printed as a trimmed decimal fraction.
fn fraction(value: u64, unit: u64) -> String {
    let whole = value / unit;
    let rest = value % unit;
    if rest == 0 {
        return whole.to_string();
    }
    let width = unit.to_string().len() - 1;
    let digits = format!("{:0width$}", rest, width = width);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}
