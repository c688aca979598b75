//! Even split of an expense amount.
//!
//! Every debtor owes the same share, computed by rounding toward zero to two
//! places. The payer's implicit share absorbs whatever is left, so the split
//! amounts plus the payer share always equal the total exactly.

use rust_decimal::{Decimal, RoundingStrategy};
use tally_shared::types::MONEY_SCALE;

/// Result of splitting a total across participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    /// Amount each non-payer participant owes.
    pub debtor_share: Decimal,
    /// Number of non-payer participants.
    pub debtor_count: usize,
    /// The payer's own portion, including any rounding remainder.
    pub payer_share: Decimal,
}

impl Allocation {
    /// Sum of all debtor shares.
    #[must_use]
    pub fn debtor_total(&self) -> Decimal {
        self.debtor_share * Decimal::from(self.debtor_count as u64)
    }
}

/// Allocation utility for even splits.
pub struct SplitAllocation;

impl SplitAllocation {
    /// Splits `total` across `participants` people, one of whom is the payer.
    ///
    /// `participants` counts the payer, so it is at least 1. A count of 0 is
    /// treated as the payer alone.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tally_core::expense::SplitAllocation;
    ///
    /// // 100 / 3 = 33.33 per debtor, payer keeps 33.34
    /// let allocation = SplitAllocation::allocate(dec!(100.00), 3);
    /// assert_eq!(allocation.debtor_share, dec!(33.33));
    /// assert_eq!(allocation.payer_share, dec!(33.34));
    /// ```
    #[must_use]
    pub fn allocate(total: Decimal, participants: usize) -> Allocation {
        let participants = participants.max(1);
        let debtor_count = participants - 1;

        let mut debtor_share = (total / Decimal::from(participants as u64))
            .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::ToZero);
        debtor_share.rescale(MONEY_SCALE);

        let debtor_total = debtor_share * Decimal::from(debtor_count as u64);
        let mut payer_share = total - debtor_total;
        payer_share.rescale(MONEY_SCALE);

        Allocation {
            debtor_share,
            debtor_count,
            payer_share,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(90.00), 3, dec!(30.00), dec!(30.00))]
    #[case(dec!(100.00), 3, dec!(33.33), dec!(33.34))]
    #[case(dec!(10.00), 4, dec!(2.50), dec!(2.50))]
    #[case(dec!(0.01), 2, dec!(0.00), dec!(0.01))]
    #[case(dec!(1.00), 3, dec!(0.33), dec!(0.34))]
    #[case(dec!(50.00), 1, dec!(50.00), dec!(50.00))]
    fn test_allocate(
        #[case] total: Decimal,
        #[case] participants: usize,
        #[case] debtor_share: Decimal,
        #[case] payer_share: Decimal,
    ) {
        let allocation = SplitAllocation::allocate(total, participants);
        assert_eq!(allocation.debtor_share, debtor_share);
        assert_eq!(allocation.payer_share, payer_share);
        assert_eq!(allocation.debtor_count, participants - 1);
        assert_eq!(allocation.debtor_total() + allocation.payer_share, total);
    }

    #[test]
    fn test_allocate_zero_participants_is_payer_only() {
        let allocation = SplitAllocation::allocate(dec!(12.34), 0);
        assert_eq!(allocation.debtor_count, 0);
        assert_eq!(allocation.payer_share, dec!(12.34));
    }

    #[test]
    fn test_shares_keep_two_places() {
        let allocation = SplitAllocation::allocate(dec!(90.00), 3);
        assert_eq!(allocation.debtor_share.scale(), 2);
        assert_eq!(allocation.payer_share.scale(), 2);
    }
}
