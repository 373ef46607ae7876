//! Deposit calculation.
//!
//! A deposit is a "professional amount": a point on a fixed lattice of
//! round figures ($50, $100, ... $5000 in the standard policy). The lattice
//! point is picked relative to a target percentage of the estimate, using
//! only points inside the min/max percentage band when the band contains
//! any.
//!
//! All arithmetic here is in whole cents. Callers holding dollars convert at
//! the boundary with [`dollars_to_cents`].

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::DepositPolicy;
use crate::models::{DepositCalculation, DepositQuote, dollars_to_cents};

/// Audit label for manually overridden deposits.
pub const MANUAL_OVERRIDE: &str = "manual_override";

/// Picks the deposit for an estimate given in cents.
///
/// 1. `min = estimate * min_percent`, `max = estimate * max_percent`,
///    `target = estimate * target_percent`.
/// 2. Candidates are the lattice points inside `[min, max]`; when there are
///    none, the whole lattice.
/// 3. The deposit is the smallest candidate `>= target`, or the largest
///    candidate when the target is above them all.
///
/// Step 2's fallback means small estimates can land outside the nominal
/// band (a $100 estimate gets a $50 deposit, 50%), and very large estimates
/// saturate at the lattice ceiling. Both are expected.
///
/// The function is total: a zero or negative estimate yields the lattice
/// floor with a percentage of 0.0 for a zero estimate.
///
/// # Example
///
/// ```
/// use event_pricing::calculation::calculate_deposit_from_estimate;
/// use event_pricing::config::PricingConfig;
/// use rust_decimal::Decimal;
///
/// let config = PricingConfig::standard();
///
/// // $1000.00 estimate: band $150..$300, target $225 -> $250.
/// let deposit = calculate_deposit_from_estimate(config.deposit(), 100_000);
/// assert_eq!(deposit.value, 25_000);
/// assert_eq!(deposit.percentage, Decimal::new(250, 1));
/// assert_eq!(deposit.picked_by, "calculated_25.0%_of_estimate");
/// ```
pub fn calculate_deposit_from_estimate(
    policy: &DepositPolicy,
    estimate_cents: i64,
) -> DepositCalculation {
    let estimate = Decimal::from(estimate_cents);
    let min_amount = estimate * policy.min_percent;
    let max_amount = estimate * policy.max_percent;
    let target_amount = estimate * policy.target_percent;

    let in_range: Vec<i64> = policy
        .lattice()
        .filter(|amount| (min_amount..=max_amount).contains(&Decimal::from(*amount)))
        .collect();
    let candidates: Vec<i64> = if in_range.is_empty() {
        policy.lattice().collect()
    } else {
        in_range
    };

    let floor = candidates
        .first()
        .copied()
        .unwrap_or(policy.lattice_step_cents);
    let value = candidates
        .iter()
        .copied()
        .find(|amount| Decimal::from(*amount) >= target_amount)
        .or_else(|| candidates.last().copied())
        .unwrap_or(floor);
    let floored_amount = candidates
        .iter()
        .copied()
        .rev()
        .find(|amount| Decimal::from(*amount) <= target_amount)
        .unwrap_or(floor);

    let percentage = percentage_of(value, estimate_cents);

    DepositCalculation {
        value,
        percentage,
        min_amount,
        max_amount,
        target_amount,
        floored_amount,
        picked_by: format!("calculated_{percentage:.1}%_of_estimate"),
    }
}

/// Same as [`calculate_deposit_from_estimate`] for an estimate in dollars.
///
/// The dollars are converted to whole cents (half-up) before any lattice
/// arithmetic.
pub fn calculate_deposit_from_dollars(
    policy: &DepositPolicy,
    estimate_dollars: Decimal,
) -> DepositCalculation {
    calculate_deposit_from_estimate(policy, dollars_to_cents(estimate_dollars))
}

/// Produces the deposit to invoice, honouring a manual override.
///
/// An override is used verbatim, off-lattice amounts included.
///
/// # Example
///
/// ```
/// use event_pricing::calculation::resolve_deposit;
/// use event_pricing::config::PricingConfig;
///
/// let config = PricingConfig::standard();
///
/// let quote = resolve_deposit(config.deposit(), 100_000, Some(12_345));
/// assert!(quote.is_manual_override);
/// assert_eq!(quote.deposit_cents, 12_345);
/// assert_eq!(quote.picked_by, "manual_override");
/// ```
pub fn resolve_deposit(
    policy: &DepositPolicy,
    estimate_cents: i64,
    manual_override_cents: Option<i64>,
) -> DepositQuote {
    match manual_override_cents {
        Some(deposit_cents) => DepositQuote {
            deposit_cents,
            percentage: percentage_of(deposit_cents, estimate_cents),
            picked_by: MANUAL_OVERRIDE.to_string(),
            is_manual_override: true,
            calculation: None,
        },
        None => {
            let calculation = calculate_deposit_from_estimate(policy, estimate_cents);
            DepositQuote {
                deposit_cents: calculation.value,
                percentage: calculation.percentage,
                picked_by: calculation.picked_by.clone(),
                is_manual_override: false,
                calculation: Some(calculation),
            }
        }
    }
}

/// `amount / estimate * 100` to one decimal place; 0.0 for a zero estimate.
fn percentage_of(amount_cents: i64, estimate_cents: i64) -> Decimal {
    if estimate_cents == 0 {
        return Decimal::new(0, 1);
    }
    (Decimal::from(amount_cents) / Decimal::from(estimate_cents) * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}
