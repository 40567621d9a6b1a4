use std::fmt;

use rust_decimal::Decimal;

/// A quoted or resting price: either a concrete limit, or the market
/// sentinel. `Market` is always the best price on its own side — see
/// [`crate::book::OrderBook::best_bid`] and
/// [`crate::book::OrderBook::best_ask`], which are side-aware rather than
/// relying on a blanket `Ord` impl across both variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Price {
    Limit(Decimal),
    Market,
}

impl Price {
    /// Parses the CSV `Price` column: the literal token `MKT`, or a
    /// decimal rounded to one fractional digit.
    pub fn parse(raw: &str) -> Result<Self, rust_decimal::Error> {
        if raw.trim().eq_ignore_ascii_case("mkt") {
            Ok(Price::Market)
        } else {
            let d: Decimal = raw.trim().parse()?;
            Ok(Price::Limit(d.round_dp(1)))
        }
    }

    pub fn as_limit(self) -> Option<Decimal> {
        match self {
            Price::Limit(d) => Some(d),
            Price::Market => None,
        }
    }
}

/// Renders as `MKT` for market orders, never as a numeric sentinel —
/// this is the only place a `Price` should ever be turned into output
/// text (admission/fill events both go through this).
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Limit(d) => write!(f, "{d}"),
            Price::Market => write!(f, "MKT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mkt_case_insensitively() {
        assert_eq!(Price::parse("MKT").unwrap(), Price::Market);
        assert_eq!(Price::parse("mkt").unwrap(), Price::Market);
    }

    #[test]
    fn rounds_limit_to_one_fractional_digit() {
        let p = Price::parse("100.07").unwrap();
        assert_eq!(p, Price::Limit(Decimal::new(1001, 1)));
    }

    #[test]
    fn displays_market_as_mkt_not_a_number() {
        assert_eq!(Price::Market.to_string(), "MKT");
        assert_eq!(Price::parse("100.5").unwrap().to_string(), "100.5");
    }
}
