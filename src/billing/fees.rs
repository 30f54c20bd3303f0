use rust_decimal::{Decimal, RoundingStrategy};

use crate::database::models::Plan;
use crate::plans::ProcessingFeeType;

/// Fee charged on top of `amount` for `plan`, rounded to cents.
///
/// Plans without a mandatory fee, or with an incomplete fee setup, charge nothing.
pub fn processing_fee(plan: &Plan, amount: Decimal) -> Decimal {
    if !plan.processing_fee_mandatory {
        return Decimal::ZERO;
    }

    let fee = match plan.fee_type() {
        Some(ProcessingFeeType::Fixed) => plan.processing_fee_fixed_amount.unwrap_or(Decimal::ZERO),
        Some(ProcessingFeeType::Percentage) => {
            amount * plan.processing_fee_percentage.unwrap_or(Decimal::ZERO) / Decimal::ONE_HUNDRED
        }
        None => Decimal::ZERO,
    };

    fee.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
