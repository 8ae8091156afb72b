//! Shared ratio formulas.
//!
//! Every function takes optional operands and returns `None` when an operand
//! is missing, a denominator is zero, or the result is not finite.

pub fn safe_div(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let (n, d) = (numerator?, denominator?);
    if d == 0.0 {
        return None;
    }
    let q = n / d;
    q.is_finite().then_some(q)
}

/// `numerator / denominator * 100`
pub fn percentage(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    safe_div(numerator, denominator).map(|r| r * 100.0)
}

/// `(current - previous) / |previous| * 100`.
///
/// A prior value whose magnitude is below `min_base` carries no meaningful
/// growth rate and yields `None`.
pub fn growth_rate(current: Option<f64>, previous: Option<f64>, min_base: f64) -> Option<f64> {
    let (c, p) = (current?, previous?);
    if !p.is_finite() || p.abs() < min_base {
        return None;
    }
    percentage(Some(c - p), Some(p.abs()))
}

/// `gross dividends / |net income| * 100`, `None` when `|net income| < min_net_income`
pub fn payout_ratio(gross_dividends: Option<f64>, net_income: Option<f64>, min_net_income: f64) -> Option<f64> {
    let ni = net_income?;
    if ni.abs() < min_net_income {
        return None;
    }
    percentage(gross_dividends, Some(ni.abs()))
}

pub fn market_cap(price: Option<f64>, share_count: Option<f64>) -> Option<f64> {
    let cap = price? * share_count?;
    cap.is_finite().then_some(cap)
}

/// `price / (equity / share count)`
pub fn price_to_book(price: Option<f64>, equity: Option<f64>, share_count: Option<f64>) -> Option<f64> {
    safe_div(price, safe_div(equity, share_count))
}

/// `price / (revenue / share count)`
pub fn price_to_sales(price: Option<f64>, revenue: Option<f64>, share_count: Option<f64>) -> Option<f64> {
    safe_div(price, safe_div(revenue, share_count))
}

/// `(price * share count + total debt) / EBITDA`
pub fn ev_to_ebitda(
    price: Option<f64>,
    share_count: Option<f64>,
    total_debt: Option<f64>,
    ebitda: Option<f64>,
) -> Option<f64> {
    let enterprise_value = market_cap(price, share_count)? + total_debt?;
    safe_div(Some(enterprise_value), ebitda)
}

/// Target price has no model yet; it is reported as not available.
pub fn target_price() -> Option<f64> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_safe_div_guards() {
        assert_eq!(safe_div(Some(1.0), Some(0.0)), None);
        assert_eq!(safe_div(None, Some(2.0)), None);
        assert_eq!(safe_div(Some(1.0), None), None);
        assert_eq!(safe_div(Some(f64::MAX), Some(f64::MIN_POSITIVE)), None);
        assert_relative_eq!(safe_div(Some(1.0), Some(4.0)).unwrap(), 0.25);
    }

    #[test]
    fn test_growth_rate() {
        assert_relative_eq!(growth_rate(Some(120.0), Some(100.0), 0.01).unwrap(), 20.0);
        // negative base uses its magnitude
        assert_relative_eq!(growth_rate(Some(-50.0), Some(-100.0), 0.01).unwrap(), 50.0);
        assert_eq!(growth_rate(Some(100.0), Some(0.005), 0.01), None);
        assert_eq!(growth_rate(Some(100.0), Some(-0.009), 0.01), None);
        assert_eq!(growth_rate(Some(100.0), Some(0.0), 0.01), None);
        assert_eq!(growth_rate(None, Some(100.0), 0.01), None);
        assert_eq!(growth_rate(Some(100.0), None, 0.01), None);
    }

    #[test]
    fn test_growth_rate_at_threshold() {
        assert_relative_eq!(growth_rate(Some(0.02), Some(0.01), 0.01).unwrap(), 100.0);
    }

    #[test]
    fn test_payout_ratio() {
        assert_relative_eq!(payout_ratio(Some(40.0), Some(100.0), 0.01).unwrap(), 40.0);
        assert_relative_eq!(payout_ratio(Some(40.0), Some(-100.0), 0.01).unwrap(), 40.0);
        assert_eq!(payout_ratio(Some(40.0), Some(0.001), 0.01), None);
        assert_eq!(payout_ratio(None, Some(100.0), 0.01), None);
    }

    #[test]
    fn test_valuation_multiples() {
        // book value per share = 2000 / 100 = 20
        assert_relative_eq!(price_to_book(Some(50.0), Some(2000.0), Some(100.0)).unwrap(), 2.5);
        assert_eq!(price_to_book(Some(50.0), Some(0.0), Some(100.0)), None);
        assert_eq!(price_to_book(Some(50.0), Some(2000.0), Some(0.0)), None);

        assert_relative_eq!(price_to_sales(Some(50.0), Some(10_000.0), Some(100.0)).unwrap(), 0.5);

        // EV = 50 * 100 + 1000 = 6000
        assert_relative_eq!(
            ev_to_ebitda(Some(50.0), Some(100.0), Some(1000.0), Some(1500.0)).unwrap(),
            4.0
        );
        assert_eq!(ev_to_ebitda(Some(50.0), Some(100.0), None, Some(1500.0)), None);
        assert_eq!(ev_to_ebitda(Some(50.0), Some(100.0), Some(1000.0), Some(0.0)), None);
    }

    #[test]
    fn test_target_price_not_available() {
        assert_eq!(target_price(), None);
    }
}
