//! Repayment terms computation.
//!
//! Interest is apportioned evenly over the term at a fixed annual rate,
//! with a flat processing fee collected upfront. The fee is reflected in
//! the reported terms, not deducted from the disbursed principal.
//!
//! Rounding policy, fixed once and applied uniformly: Banker's rounding
//! (`MidpointNearestEven`) to 2 decimal places.

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::LoanError;

/// Durations a loan may run for, in months.
pub const ALLOWED_DURATIONS: [u32; 5] = [3, 6, 12, 18, 24];

/// Lower inclusive bound on the principal.
#[must_use]
pub fn min_principal() -> Decimal {
    Decimal::new(1_000, 0)
}

/// Upper inclusive bound on the principal.
#[must_use]
pub fn max_principal() -> Decimal {
    Decimal::new(50_000, 0)
}

/// Fixed annual interest rate (12%).
fn annual_rate() -> Decimal {
    Decimal::new(12, 2)
}

/// Flat processing fee rate (2% of principal).
fn fee_rate() -> Decimal {
    Decimal::new(2, 2)
}

fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Computed repayment terms for a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanTerms {
    /// Instalment due each month.
    pub monthly_payment: Decimal,
    /// Flat upfront fee.
    pub processing_fee: Decimal,
    /// Total repaid over the term (monthly payment times duration).
    pub total_repayable: Decimal,
}

impl LoanTerms {
    /// Validates principal bounds and the duration set.
    ///
    /// # Errors
    ///
    /// Returns `LoanError::PrincipalOutOfRange` or
    /// `LoanError::UnsupportedDuration`; nothing is persisted on failure.
    pub fn validate(principal: Decimal, duration_months: u32) -> Result<(), LoanError> {
        if principal < min_principal() || principal > max_principal() {
            return Err(LoanError::PrincipalOutOfRange(principal));
        }
        if !ALLOWED_DURATIONS.contains(&duration_months) {
            return Err(LoanError::UnsupportedDuration(duration_months));
        }
        Ok(())
    }

    /// Computes the terms for validated input:
    /// `monthly = (principal + principal * 12% * months/12) / months`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-range input; terms are never
    /// computed from unvalidated figures.
    pub fn compute(principal: Decimal, duration_months: u32) -> Result<Self, LoanError> {
        Self::validate(principal, duration_months)?;

        let months = Decimal::from(duration_months);
        let years = months / Decimal::from(12u32);
        let total_interest = principal * annual_rate() * years;

        let monthly_payment = round_money((principal + total_interest) / months);
        let processing_fee = round_money(principal * fee_rate());
        let total_repayable = monthly_payment * months;

        Ok(Self {
            monthly_payment,
            processing_fee,
            total_repayable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    // 12 months of 12% interest on 10000: (10000 + 1200) / 12
    #[case(dec!(10000), 12, dec!(933.33), dec!(200.00))]
    // 6 months: (6000 + 6000 * 0.12 * 0.5) / 6
    #[case(dec!(6000), 6, dec!(1060.00), dec!(120.00))]
    // 3 months at the minimum principal
    #[case(dec!(1000), 3, dec!(343.33), dec!(20.00))]
    // 24 months at the maximum principal: (50000 + 12000) / 24
    #[case(dec!(50000), 24, dec!(2583.33), dec!(1000.00))]
    fn test_terms_computation(
        #[case] principal: Decimal,
        #[case] duration: u32,
        #[case] expected_monthly: Decimal,
        #[case] expected_fee: Decimal,
    ) {
        let terms = LoanTerms::compute(principal, duration).unwrap();
        assert_eq!(terms.monthly_payment, expected_monthly);
        assert_eq!(terms.processing_fee, expected_fee);
        assert_eq!(terms.total_repayable, expected_monthly * Decimal::from(duration));
    }

    #[rstest]
    #[case(dec!(999.99))]
    #[case(dec!(500))]
    #[case(dec!(0))]
    #[case(dec!(-1000))]
    #[case(dec!(50000.01))]
    fn test_principal_out_of_range(#[case] principal: Decimal) {
        assert!(matches!(
            LoanTerms::compute(principal, 12),
            Err(LoanError::PrincipalOutOfRange(_))
        ));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(4)]
    #[case(13)]
    #[case(36)]
    fn test_unsupported_duration(#[case] duration: u32) {
        assert!(matches!(
            LoanTerms::compute(dec!(5000), duration),
            Err(LoanError::UnsupportedDuration(_))
        ));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(LoanTerms::compute(dec!(1000), 3).is_ok());
        assert!(LoanTerms::compute(dec!(50000), 24).is_ok());
    }

    proptest! {
        #[test]
        fn prop_terms_match_formula(
            principal_units in 1_000i64..=50_000,
            duration_idx in 0usize..ALLOWED_DURATIONS.len(),
        ) {
            let principal = Decimal::new(principal_units, 0);
            let duration = ALLOWED_DURATIONS[duration_idx];
            let terms = LoanTerms::compute(principal, duration).unwrap();

            let months = Decimal::from(duration);
            let expected = (principal
                + principal * Decimal::new(12, 2) * months / Decimal::from(12u32))
                / months;
            let expected = expected
                .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

            prop_assert_eq!(terms.monthly_payment, expected);
            // Interest means repaying at least the principal.
            prop_assert!(terms.total_repayable >= principal);
            prop_assert!(terms.processing_fee > Decimal::ZERO);
        }
    }
}
