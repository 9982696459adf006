/// Formats an amount as Indonesian Rupiah with dot grouping and no
/// fraction digits, e.g. `Rp 1.234.567`. Negative amounts keep a
/// leading minus so inconsistent tax remainders stay visible.
pub fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}
