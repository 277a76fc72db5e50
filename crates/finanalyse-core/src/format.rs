//! Display formatters for financial values.
//!
//! Every formatter takes a raw number; `na_or` guards against missing or
//! non-finite values and renders them as `N/A`.

pub const NOT_AVAILABLE: &str = "N/A";

pub fn na_or(value: Option<f64>, formatter: impl Fn(f64) -> String) -> String {
    match value {
        Some(v) if v.is_finite() => formatter(v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `152300000000.0` -> `$152.3B`
pub fn currency_billions(n: f64) -> String {
    format!("${:.1}B", n / 1e9)
}

/// Ratio to percent: `0.183` -> `18.3%`
pub fn percentage(n: f64) -> String {
    format!("{:.1}%", n * 100.0)
}

/// `12.34` -> `12.3x`
pub fn ratio_multiple(n: f64) -> String {
    format!("{:.1}x", n)
}

pub fn price(n: f64) -> String {
    format!("${:.2}", n)
}

pub fn fixed(decimals: usize) -> impl Fn(f64) -> String {
    move |n| format!("{:.*}", decimals, n)
}

/// Signed percent change as reported by the movers endpoints (already in percent).
pub fn signed_percent(n: f64) -> String {
    if n >= 0.0 {
        format!("+{:.2}%", n)
    } else {
        format!("{:.2}%", n)
    }
}
