//! Shared reply formatting helpers.

/// Formats a minor-unit amount as a currency string, e.g. `12.50€`.
#[must_use]
pub fn format_amount(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let minor = minor.unsigned_abs();
    format!("{sign}{}.{:02}€", minor / 100, minor % 100)
}

/// `"s"` when a count asks for a plural, `""` otherwise.
#[must_use]
pub fn plural_s(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
