use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a string is not a member of one of the plan enums
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not one of: {}", .allowed.join(", "))]
pub struct UnknownVariant {
    pub value: String,
    pub allowed: &'static [&'static str],
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant,)+
        }

        impl $name {
            pub const NAMES: &'static [&'static str] = &[$($text),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        value: s.to_string(),
                        allowed: Self::NAMES,
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Billing period of a plan
    PlanDuration {
        Monthly => "monthly",
        ThreeMonths => "3months",
        SixMonths => "6months",
        Yearly => "yearly",
        PayGo => "paygo",
    }
}

string_enum! {
    /// Who a plan is sold to
    PlanType {
        Individual => "individual",
        Organization => "organization",
    }
}

string_enum! {
    ProcessingFeeType {
        Fixed => "fixed",
        Percentage => "percentage",
    }
}

string_enum! {
    PaymentMethod {
        Card => "card",
        Paypal => "paypal",
        GooglePay => "google_pay",
        ApplePay => "apple_pay",
    }
}

impl PlanDuration {
    /// Length of one billing period; pay-as-you-go plans never lapse
    pub fn months(self) -> Option<u32> {
        match self {
            Self::Monthly => Some(1),
            Self::ThreeMonths => Some(3),
            Self::SixMonths => Some(6),
            Self::Yearly => Some(12),
            Self::PayGo => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!("3months".parse::<PlanDuration>(), Ok(PlanDuration::ThreeMonths));
        assert_eq!("google_pay".parse::<PaymentMethod>(), Ok(PaymentMethod::GooglePay));
        assert_eq!(PlanType::Organization.to_string(), "organization");
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "weekly".parse::<PlanDuration>().unwrap_err();
        assert_eq!(err.to_string(), "'weekly' is not one of: monthly, 3months, 6months, yearly, paygo");
    }

    #[test]
    fn serde_uses_wire_names() {
        let value = serde_json::to_value(PlanDuration::SixMonths).unwrap();
        assert_eq!(value, serde_json::json!("6months"));
    }

    #[test]
    fn paygo_has_no_period() {
        assert_eq!(PlanDuration::PayGo.months(), None);
        assert_eq!(PlanDuration::Yearly.months(), Some(12));
    }
}
