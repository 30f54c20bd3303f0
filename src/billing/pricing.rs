use rust_decimal::Decimal;

use crate::database::models::{Plan, RegionalPrice};
use crate::validation::{Checklist, ValidationError};

/// What a subscriber in one country has to pay for a plan
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub price: Decimal,
    /// `None` when the base plan price applies, which carries no currency
    pub currency: Option<String>,
}

/// Pick the price row for `country_code`, then the region-wide row in `currency`,
/// then the plan's base price.
///
/// A row for the country always wins, so paying in another currency there is refused.
pub fn quote_price(plan: &Plan, prices: &[RegionalPrice], currency: &str, country_code: &str) -> PriceQuote {
    let same_currency = |p: &&RegionalPrice| p.currency.eq_ignore_ascii_case(currency);
    let for_country: Vec<&RegionalPrice> = prices
        .iter()
        .filter(|p| p.country_code.as_deref().is_some_and(|c| c.eq_ignore_ascii_case(country_code)))
        .collect();

    let chosen = if for_country.is_empty() {
        prices.iter().filter(|p| p.country_code.is_none()).find(same_currency)
    } else {
        for_country.iter().copied().find(same_currency).or(for_country.first().copied())
    };

    match chosen {
        Some(row) => PriceQuote {
            price: row.price,
            currency: Some(row.currency.clone()),
        },
        None => PriceQuote {
            price: plan.price,
            currency: None,
        },
    }
}

impl PriceQuote {
    /// Both the amount and the currency of a payment must match the quote
    pub fn check(&self, amount: Decimal, currency: &str) -> Result<(), ValidationError> {
        let mut checklist = Checklist::new();
        checklist.check(
            "amount",
            amount == self.price,
            format!("Amount must equal the plan price of {}", self.price),
        );
        if let Some(expected) = &self.currency {
            checklist.check(
                "currency",
                expected.eq_ignore_ascii_case(currency),
                format!("Currency must be {}", expected),
            );
        }
        checklist.finish()
    }
}
