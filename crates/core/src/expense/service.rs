//! Validation of new expenses.

use chrono::Utc;
use tally_shared::types::{ExpenseId, UserId, validate_amount};

use crate::expense::allocation::SplitAllocation;
use crate::expense::error::ExpenseError;
use crate::expense::types::{ExpenseDraft, ExpenseRecord, ExpenseSplit, NewExpense};
use crate::team::types::Team;

/// Stateless service that turns a [`NewExpense`] into a storable draft.
pub struct ExpenseService;

impl ExpenseService {
    /// Validates an expense against the team roster and computes its splits.
    ///
    /// Checks, in order: name, amount, payer membership, participant
    /// membership. The payer is always a participant; involved IDs are
    /// de-duplicated keeping first-seen order. Each non-payer participant
    /// gets one pending split.
    pub fn prepare(input: NewExpense, team: &Team) -> Result<ExpenseDraft, ExpenseError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ExpenseError::EmptyName);
        }

        let amount = validate_amount(input.amount)?;

        if !team.is_member(input.payer_id) {
            return Err(ExpenseError::PayerNotMember(input.payer_id));
        }
        if let Some(outsider) = input
            .involved_member_ids
            .iter()
            .find(|id| !team.is_member(**id))
        {
            return Err(ExpenseError::ParticipantNotMember(*outsider));
        }

        let debtors = Self::debtors(input.payer_id, &input.involved_member_ids);
        let allocation = SplitAllocation::allocate(amount, debtors.len() + 1);

        let expense = ExpenseRecord {
            id: ExpenseId::new(),
            team_id: team.id,
            name: name.to_string(),
            description: input.description.trim().to_string(),
            amount,
            payer_id: input.payer_id,
            created_at: Utc::now(),
        };

        let splits = debtors
            .into_iter()
            .map(|debtor_id| ExpenseSplit::pending(expense.id, debtor_id, allocation.debtor_share))
            .collect();

        Ok(ExpenseDraft {
            expense,
            splits,
            payer_share: allocation.payer_share,
        })
    }

    /// Non-payer participants, de-duplicated in first-seen order.
    fn debtors(payer_id: UserId, involved: &[UserId]) -> Vec<UserId> {
        let mut debtors: Vec<UserId> = Vec::with_capacity(involved.len());
        for id in involved {
            if *id != payer_id && !debtors.contains(id) {
                debtors.push(*id);
            }
        }
        debtors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::settlement::types::SplitStatus;

    struct Fixture {
        team: Team,
        payer: UserId,
        d1: UserId,
        d2: UserId,
    }

    fn fixture() -> Fixture {
        let payer = UserId::new();
        let d1 = UserId::new();
        let d2 = UserId::new();
        let mut team = Team::new("Trip", payer);
        team.members.extend([d1, d2]);
        Fixture { team, payer, d1, d2 }
    }

    fn input(f: &Fixture, amount: Decimal, involved: Vec<UserId>) -> NewExpense {
        NewExpense {
            team_id: f.team.id,
            name: "Dinner".to_string(),
            description: "Friday".to_string(),
            amount,
            payer_id: f.payer,
            involved_member_ids: involved,
        }
    }

    #[test]
    fn test_dinner_split() {
        let f = fixture();
        let draft =
            ExpenseService::prepare(input(&f, dec!(90.00), vec![f.d1, f.d2]), &f.team).unwrap();

        assert_eq!(draft.splits.len(), 2);
        assert_eq!(draft.splits[0].debtor_id, f.d1);
        assert_eq!(draft.splits[1].debtor_id, f.d2);
        assert!(draft.splits.iter().all(|s| s.amount == dec!(30.00)));
        assert!(draft.splits.iter().all(|s| s.status == SplitStatus::Pending));
        assert!(draft.splits.iter().all(|s| s.expense_id == draft.expense.id));
        assert_eq!(draft.payer_share, dec!(30.00));
        assert_eq!(draft.expense.team_id, f.team.id);
    }

    #[test]
    fn test_payer_absorbs_remainder() {
        let f = fixture();
        let draft =
            ExpenseService::prepare(input(&f, dec!(100), vec![f.d1, f.d2]), &f.team).unwrap();

        assert_eq!(draft.splits[0].amount, dec!(33.33));
        assert_eq!(draft.splits[1].amount, dec!(33.33));
        assert_eq!(draft.payer_share, dec!(33.34));
        assert_eq!(draft.expense.amount.scale(), 2);
    }

    #[test]
    fn test_payer_in_involved_list_is_deduplicated() {
        let f = fixture();
        let involved = vec![f.payer, f.d1, f.d1, f.payer];
        let draft = ExpenseService::prepare(input(&f, dec!(90.00), involved), &f.team).unwrap();

        assert_eq!(draft.splits.len(), 1);
        assert_eq!(draft.splits[0].debtor_id, f.d1);
        assert_eq!(draft.splits[0].amount, dec!(45.00));
        assert_eq!(draft.payer_share, dec!(45.00));
    }

    #[test]
    fn test_payer_only_expense_has_no_splits() {
        let f = fixture();
        let draft = ExpenseService::prepare(input(&f, dec!(12.50), vec![]), &f.team).unwrap();

        assert!(draft.splits.is_empty());
        assert_eq!(draft.payer_share, dec!(12.50));
    }

    #[rstest]
    #[case(dec!(0), ExpenseError::NonPositiveAmount(dec!(0)))]
    #[case(dec!(-5.00), ExpenseError::NonPositiveAmount(dec!(-5.00)))]
    #[case(dec!(10.005), ExpenseError::TooPrecise(dec!(10.005)))]
    #[case(dec!(1000000000000), ExpenseError::TooLarge(dec!(1000000000000)))]
    #[case(Decimal::MAX, ExpenseError::TooLarge(Decimal::MAX))]
    fn test_invalid_amount(#[case] amount: Decimal, #[case] expected: ExpenseError) {
        let f = fixture();
        let result = ExpenseService::prepare(input(&f, amount, vec![f.d1]), &f.team);
        assert_eq!(result, Err(expected));
    }

    #[test]
    fn test_trailing_zeros_accepted() {
        let f = fixture();
        let draft =
            ExpenseService::prepare(input(&f, dec!(90.000), vec![f.d1, f.d2]), &f.team).unwrap();
        assert_eq!(draft.expense.amount, dec!(90.00));
        assert_eq!(draft.expense.amount.scale(), 2);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_blank_name(#[case] name: &str) {
        let f = fixture();
        let mut new_expense = input(&f, dec!(10), vec![f.d1]);
        new_expense.name = name.to_string();
        assert_eq!(
            ExpenseService::prepare(new_expense, &f.team),
            Err(ExpenseError::EmptyName)
        );
    }

    #[test]
    fn test_payer_not_member() {
        let f = fixture();
        let outsider = UserId::new();
        let mut new_expense = input(&f, dec!(10), vec![f.d1]);
        new_expense.payer_id = outsider;
        assert_eq!(
            ExpenseService::prepare(new_expense, &f.team),
            Err(ExpenseError::PayerNotMember(outsider))
        );
    }

    #[test]
    fn test_participant_not_member() {
        let f = fixture();
        let outsider = UserId::new();
        assert_eq!(
            ExpenseService::prepare(input(&f, dec!(10), vec![f.d1, outsider]), &f.team),
            Err(ExpenseError::ParticipantNotMember(outsider))
        );
    }
}
