//! Console rendering for money, percentages and scores.

/// `1234567.891` -> `$1,234,567.89`
pub fn usd(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// `2.5` -> `+2.50%`
pub fn signed_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

/// Scores are stored on a 0..1 scale and shown out of ten.
pub fn score_out_of_ten(score: f64) -> String {
    format!("{:.1}/10", score * 10.0)
}
