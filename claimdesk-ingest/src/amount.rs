//! Money parsing for spreadsheet cells: "$1,500,000.00", "(250.00)", "1 200,5-".

use regex::Regex;
use std::sync::OnceLock;

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^(?P<open>\()?\s*(?P<lead>[-+])?\s*",
            r"(?:[A-Z]{3}\s*)?[$€£¥]?\s*",
            r"(?P<num>\d[\d,' ]*(?:\.\d+)?|\.\d+)",
            r"\s*(?:[A-Z]{3})?\s*(?P<trail>-)?\s*(?P<close>\))?$"
        ))
        .expect("static regex")
    })
}

/// Parse a formatted amount. Accounting parentheses and a leading or
/// trailing minus mark negatives. Returns `None` for anything else.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<f64>() {
        return v.is_finite().then_some(v);
    }

    let caps = amount_re().captures(s)?;
    // Parentheses must balance
    if caps.name("open").is_some() != caps.name("close").is_some() {
        return None;
    }

    let value: f64 = plain_digits(caps["num"].trim_end()).parse().ok()?;

    let negative = caps.name("open").is_some()
        || caps.name("lead").map(|m| m.as_str()) == Some("-")
        || caps.name("trail").is_some();

    Some(if negative { -value } else { value })
}

/// Drop grouping separators. With no decimal point present, a last comma
/// followed by one or two digits is a decimal comma: "1 200,5" is 1200.5,
/// while "1,200" stays 1200.
fn plain_digits(num: &str) -> String {
    let decimal_comma = num.rfind(',').filter(|&i| {
        let tail = &num[i + 1..];
        !num.contains('.') && (1..=2).contains(&tail.len()) && tail.bytes().all(|b| b.is_ascii_digit())
    });
    num.char_indices()
        .filter_map(|(i, c)| match c {
            ',' if Some(i) == decimal_comma => Some('.'),
            ',' | '\'' | ' ' => None,
            c => Some(c),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_amount("1500000"), Some(1_500_000.0));
        assert_eq!(parse_amount("-2500.5"), Some(-2500.5));
        assert_eq!(parse_amount(" 42 "), Some(42.0));
    }

    #[test]
    fn test_formatted_amounts() {
        assert_eq!(parse_amount("$1,500,000.00"), Some(1_500_000.0));
        assert_eq!(parse_amount("-$250.75"), Some(-250.75));
        assert_eq!(parse_amount("(250.00)"), Some(-250.0));
        assert_eq!(parse_amount("1,200-"), Some(-1200.0));
        assert_eq!(parse_amount("USD 3,000"), Some(3000.0));
        assert_eq!(parse_amount("3'000 CHF"), Some(3000.0));
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(parse_amount("1 200,5-"), Some(-1200.5));
        assert_eq!(parse_amount("(1 234,56)"), Some(-1234.56));
        assert_eq!(parse_amount("3'000,25 CHF"), Some(3000.25));
        // three trailing digits is still a thousands group
        assert_eq!(parse_amount("1,200"), Some(1200.0));
        assert_eq!(parse_amount("1,200.50"), Some(1200.5));
    }

    #[test]
    fn test_rejects_non_amounts() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("n/a"), None);
        assert_eq!(parse_amount("(100"), None);
        assert_eq!(parse_amount("NaN"), None);
    }
}
