//! Cost parameters applied uniformly to every offer in a comparison run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Customs duty, VAT and a fixed fee.
///
/// Percentages are expressed in percent (`15` means 15 %). The fee is in the
/// local currency. All three are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCostParameters")]
pub struct CostParameters {
    customs_duty_percent: Decimal,
    tax_percent: Decimal,
    additional_fee_fixed: Decimal,
}

#[derive(Deserialize)]
struct RawCostParameters {
    customs_duty_percent: Decimal,
    tax_percent: Decimal,
    additional_fee_fixed: Decimal,
}

impl TryFrom<RawCostParameters> for CostParameters {
    type Error = DomainError;

    fn try_from(raw: RawCostParameters) -> Result<Self, Self::Error> {
        CostParameters::new(
            raw.customs_duty_percent,
            raw.tax_percent,
            raw.additional_fee_fixed,
        )
    }
}

impl CostParameters {
    pub fn new(
        customs_duty_percent: Decimal,
        tax_percent: Decimal,
        additional_fee_fixed: Decimal,
    ) -> Result<Self, DomainError> {
        let checks = [
            ("customs_duty_percent", customs_duty_percent),
            ("tax_percent", tax_percent),
            ("additional_fee_fixed", additional_fee_fixed),
        ];
        for (field, value) in checks {
            if value < Decimal::ZERO {
                return Err(DomainError::NegativeParameter { field, value });
            }
        }

        Ok(Self {
            customs_duty_percent,
            tax_percent,
            additional_fee_fixed,
        })
    }

    pub fn customs_duty_percent(&self) -> Decimal {
        self.customs_duty_percent
    }

    pub fn tax_percent(&self) -> Decimal {
        self.tax_percent
    }

    pub fn additional_fee_fixed(&self) -> Decimal {
        self.additional_fee_fixed
    }

    /// `1 + customs_duty_percent / 100`
    pub fn customs_factor(&self) -> Decimal {
        percent_factor(self.customs_duty_percent)
    }

    /// `1 + tax_percent / 100`
    pub fn tax_factor(&self) -> Decimal {
        percent_factor(self.tax_percent)
    }
}

fn percent_factor(percent: Decimal) -> Decimal {
    Decimal::ONE + percent / Decimal::ONE_HUNDRED
}

impl Default for CostParameters {
    /// 15 % customs, 19 % VAT, 50 000 DZD of fixed fees.
    fn default() -> Self {
        Self {
            customs_duty_percent: Decimal::from(15),
            tax_percent: Decimal::from(19),
            additional_fee_fixed: Decimal::from(50_000),
        }
    }
}
