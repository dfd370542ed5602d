//! Display formatting helpers for capital values, returns, and tickers

/// Compact dollar formatting: `$999`, `$1.5K`, `$220K`, `$3.20M`, `$15M`.
/// The K band shows one decimal, the M band two; integral values drop the
/// decimals entirely.
pub fn format_capital(value: f64) -> String {
    if value >= 1_000_000.0 {
        let millions = value / 1_000_000.0;
        if millions.fract() == 0.0 {
            format!("${}M", millions as i64)
        } else {
            format!("${millions:.2}M")
        }
    } else if value >= 1_000.0 {
        let thousands = value / 1_000.0;
        if thousands.fract() == 0.0 {
            format!("${}K", thousands as i64)
        } else {
            format!("${thousands:.1}K")
        }
    } else {
        format!("${}", value as i64)
    }
}

/// Signed percent with one decimal from a fraction: 0.08 -> `+8.0%`
pub fn format_return(fraction: f64) -> String {
    format!("{:+.1}%", fraction * 100.0)
}

/// Ticker-like abbreviation from a display name: first word, uppercased,
/// at most four characters
pub fn derive_ticker(name: &str) -> String {
    name.split_whitespace()
        .next()
        .unwrap_or("")
        .to_uppercase()
        .chars()
        .take(4)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capital_formatting_boundaries() {
        assert_eq!(format_capital(999.0), "$999");
        assert_eq!(format_capital(1_500.0), "$1.5K");
        assert_eq!(format_capital(220_000.0), "$220K");
        assert_eq!(format_capital(3_200_000.0), "$3.20M");
        assert_eq!(format_capital(15_000_000.0), "$15M");
    }

    #[test]
    fn capital_formatting_edges() {
        assert_eq!(format_capital(0.0), "$0");
        assert_eq!(format_capital(1_000.0), "$1K");
        assert_eq!(format_capital(999_999.0), "$1000.0K");
        assert_eq!(format_capital(1_000_000.0), "$1M");
    }

    #[test]
    fn returns_format_as_signed_percent() {
        assert_eq!(format_return(0.08), "+8.0%");
        assert_eq!(format_return(-0.021), "-2.1%");
        assert_eq!(format_return(0.0), "+0.0%");
    }

    #[test]
    fn tickers_derive_from_the_first_word() {
        assert_eq!(derive_ticker("NVIDIA Corp"), "NVID");
        assert_eq!(derive_ticker("ARK Innovation ETF"), "ARK");
        assert_eq!(derive_ticker("S&P 500 ETF"), "S&P");
        assert_eq!(derive_ticker(""), "");
    }
}
