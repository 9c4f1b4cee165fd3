/// Formats an amount with thousands separators and two fraction digits,
/// e.g. `1234567.891` becomes `"1,234,567.89"`.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    // Non-finite values have no digits to group.
    if !whole.bytes().all(|b| b.is_ascii_digit()) {
        return fixed;
    }

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}{grouped}.{fraction}")
}
