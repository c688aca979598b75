//! Balance, total, and debt calculations over ledger state.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use tally_shared::types::{ExpenseId, UserId};

use crate::balance::types::{BalanceReport, Debt};
use crate::expense::types::{ExpenseRecord, ExpenseSplit};

/// Stateless aggregator over a team's expenses and splits.
pub struct BalanceAggregator;

impl BalanceAggregator {
    /// Net position of every user appearing in the expenses.
    ///
    /// `net = Σ unsettled splits as payer − Σ unsettled splits as debtor`.
    /// Users whose splits are all settled still appear, with zero.
    #[must_use]
    pub fn balances(
        expenses: &[ExpenseRecord],
        splits: &[ExpenseSplit],
    ) -> BTreeMap<UserId, Decimal> {
        let payers = Self::payers(expenses);
        let mut balances: BTreeMap<UserId, Decimal> = BTreeMap::new();

        for expense in expenses {
            balances.entry(expense.payer_id).or_insert(Decimal::ZERO);
        }

        for split in splits {
            let Some(payer_id) = payers.get(&split.expense_id).copied() else {
                continue;
            };
            let debtor = balances.entry(split.debtor_id).or_insert(Decimal::ZERO);
            if !split.is_outstanding() {
                continue;
            }
            *debtor -= split.amount;
            *balances.entry(payer_id).or_insert(Decimal::ZERO) += split.amount;
        }

        balances
    }

    /// Sum of every expense amount regardless of settlement.
    #[must_use]
    pub fn total(expenses: &[ExpenseRecord]) -> Decimal {
        expenses.iter().map(|e| e.amount).sum()
    }

    /// Pairwise net debts from unsettled splits.
    ///
    /// Obligations in both directions between two users cancel out; pairs
    /// that net to zero are omitted.
    #[must_use]
    pub fn debts(expenses: &[ExpenseRecord], splits: &[ExpenseSplit]) -> Vec<Debt> {
        let payers = Self::payers(expenses);

        // Keyed by (lower id, higher id); positive means lower owes higher.
        let mut pairs: BTreeMap<(UserId, UserId), Decimal> = BTreeMap::new();

        for split in splits.iter().filter(|s| s.is_outstanding()) {
            let Some(payer_id) = payers.get(&split.expense_id).copied() else {
                continue;
            };
            if payer_id == split.debtor_id {
                continue;
            }

            let (key, amount) = if split.debtor_id < payer_id {
                ((split.debtor_id, payer_id), split.amount)
            } else {
                ((payer_id, split.debtor_id), -split.amount)
            };
            *pairs.entry(key).or_insert(Decimal::ZERO) += amount;
        }

        let mut debts: Vec<Debt> = pairs
            .into_iter()
            .filter(|(_, net)| !net.is_zero())
            .map(|((low, high), net)| {
                if net > Decimal::ZERO {
                    Debt { from: low, to: high, amount: net }
                } else {
                    Debt { from: high, to: low, amount: -net }
                }
            })
            .collect();

        debts.sort_by(|a, b| a.from.cmp(&b.from).then(a.to.cmp(&b.to)));
        debts
    }

    /// Total, balances, and debts in one pass over the same snapshot.
    #[must_use]
    pub fn report(expenses: &[ExpenseRecord], splits: &[ExpenseSplit]) -> BalanceReport {
        BalanceReport {
            total: Self::total(expenses),
            balances: Self::balances(expenses, splits),
            debts: Self::debts(expenses, splits),
        }
    }

    fn payers(expenses: &[ExpenseRecord]) -> HashMap<ExpenseId, UserId> {
        expenses.iter().map(|e| (e.id, e.payer_id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use tally_shared::types::TeamId;

    use crate::settlement::types::SplitStatus;

    fn expense(team_id: TeamId, payer_id: UserId, amount: Decimal) -> ExpenseRecord {
        ExpenseRecord {
            id: ExpenseId::new(),
            team_id,
            name: "Dinner".to_string(),
            description: String::new(),
            amount,
            payer_id,
            created_at: Utc::now(),
        }
    }

    fn split(expense: &ExpenseRecord, debtor_id: UserId, amount: Decimal) -> ExpenseSplit {
        ExpenseSplit::pending(expense.id, debtor_id, amount)
    }

    #[test]
    fn test_empty_team() {
        assert!(BalanceAggregator::balances(&[], &[]).is_empty());
        assert_eq!(BalanceAggregator::total(&[]), Decimal::ZERO);
        assert!(BalanceAggregator::debts(&[], &[]).is_empty());
    }

    #[test]
    fn test_single_expense_balances() {
        let team = TeamId::new();
        let (p, d1, d2) = (UserId::new(), UserId::new(), UserId::new());
        let e = expense(team, p, dec!(90.00));
        let splits = vec![split(&e, d1, dec!(30.00)), split(&e, d2, dec!(30.00))];

        let balances = BalanceAggregator::balances(&[e.clone()], &splits);

        assert_eq!(balances[&p], dec!(60.00));
        assert_eq!(balances[&d1], dec!(-30.00));
        assert_eq!(balances[&d2], dec!(-30.00));
        assert_eq!(BalanceAggregator::total(&[e]), dec!(90.00));
    }

    #[test]
    fn test_settled_splits_drop_out_but_users_remain() {
        let team = TeamId::new();
        let (p, d1, d2) = (UserId::new(), UserId::new(), UserId::new());
        let e = expense(team, p, dec!(90.00));
        let mut settled = split(&e, d1, dec!(30.00));
        settled.status = SplitStatus::Settled;
        let requested = ExpenseSplit {
            status: SplitStatus::Requested,
            ..split(&e, d2, dec!(30.00))
        };

        let balances = BalanceAggregator::balances(&[e.clone()], &[settled, requested]);

        assert_eq!(balances.len(), 3);
        assert_eq!(balances[&p], dec!(30.00));
        assert_eq!(balances[&d1], Decimal::ZERO);
        assert_eq!(balances[&d2], dec!(-30.00));
        assert_eq!(BalanceAggregator::total(&[e]), dec!(90.00));
    }

    #[test]
    fn test_balances_sum_to_zero() {
        let team = TeamId::new();
        let (a, b, c) = (UserId::new(), UserId::new(), UserId::new());
        let e1 = expense(team, a, dec!(100.00));
        let e2 = expense(team, b, dec!(60.00));
        let splits = vec![
            split(&e1, b, dec!(33.33)),
            split(&e1, c, dec!(33.33)),
            split(&e2, a, dec!(20.00)),
            split(&e2, c, dec!(20.00)),
        ];

        let balances = BalanceAggregator::balances(&[e1, e2], &splits);
        let sum: Decimal = balances.values().copied().sum();

        assert_eq!(sum, Decimal::ZERO);
        assert_eq!(balances[&a], dec!(46.66));
        assert_eq!(balances[&b], dec!(-13.33));
        assert_eq!(balances[&c], dec!(-53.33));
    }

    #[test]
    fn test_payer_only_expense_lists_payer_with_zero() {
        let p = UserId::new();
        let e = expense(TeamId::new(), p, dec!(12.00));

        let balances = BalanceAggregator::balances(&[e], &[]);
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[&p], Decimal::ZERO);
    }

    #[test]
    fn test_debts_net_opposite_obligations() {
        let team = TeamId::new();
        let (a, b) = (UserId::new(), UserId::new());
        let e1 = expense(team, a, dec!(60.00));
        let e2 = expense(team, b, dec!(20.00));
        let splits = vec![split(&e1, b, dec!(30.00)), split(&e2, a, dec!(10.00))];

        let debts = BalanceAggregator::debts(&[e1, e2], &splits);

        assert_eq!(debts, vec![Debt { from: b, to: a, amount: dec!(20.00) }]);
    }

    #[test]
    fn test_debts_cancel_to_nothing() {
        let team = TeamId::new();
        let (a, b) = (UserId::new(), UserId::new());
        let e1 = expense(team, a, dec!(20.00));
        let e2 = expense(team, b, dec!(20.00));
        let splits = vec![split(&e1, b, dec!(10.00)), split(&e2, a, dec!(10.00))];

        assert!(BalanceAggregator::debts(&[e1, e2], &splits).is_empty());
    }

    #[test]
    fn test_debts_sorted_by_debtor_then_creditor() {
        let team = TeamId::new();
        let (p, d1, d2) = (UserId::new(), UserId::new(), UserId::new());
        let e = expense(team, p, dec!(90.00));
        let splits = vec![split(&e, d2, dec!(30.00)), split(&e, d1, dec!(30.00))];

        let debts = BalanceAggregator::debts(&[e], &splits);

        assert_eq!(debts.len(), 2);
        assert!(debts[0].from < debts[1].from);
        assert!(debts.iter().all(|d| d.to == p && d.amount == dec!(30.00)));
    }

    #[test]
    fn test_report_combines_views() {
        let team = TeamId::new();
        let (p, d) = (UserId::new(), UserId::new());
        let e = expense(team, p, dec!(50.00));
        let splits = vec![split(&e, d, dec!(25.00))];

        let report = BalanceAggregator::report(&[e], &splits);

        assert_eq!(report.total, dec!(50.00));
        assert_eq!(report.balances[&p], dec!(25.00));
        assert_eq!(report.debts, vec![Debt { from: d, to: p, amount: dec!(25.00) }]);
    }
}
