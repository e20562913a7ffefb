use crate::types::Quote;

/// Heuristic day-trade score for a quote, in [0, 100].
///
/// Starts at a neutral 50. Adds 20 when the price is above the open, and
/// another 20 when the day's range exceeds 5% of the open. Missing fields
/// simply skip their bonus.
pub fn heuristic_score(quote: &Quote) -> u8 {
    let mut score: u8 = 50;

    if let (Some(current), Some(open)) = (quote.current, quote.open) {
        if current > open {
            score += 20;
        }
    }

    if let (Some(high), Some(low), Some(open)) = (quote.high, quote.low, quote.open) {
        if high - low > 0.05 * open {
            score += 20;
        }
    }

    score.min(100)
}
