//! Ledger engine - turns a snapshot and a reporting month into settlement figures.
//!
//! Everything here is pure and synchronous: the same snapshot and month always
//! produce the same figures, nothing is cached and nothing can fail. Amounts are
//! `f64` and are never rounded here; two-decimal display belongs to
//! [`crate::core::report`].
//!
//! The central identity is that, for every member,
//! `settlement + meals * meal_rate == deposits`, so over a month with at least
//! one meal the settlements sum to the remaining balance. When expenses exist
//! but no meals were logged the meal rate is defined as 0, and settlements then
//! sum to total deposits instead.

use crate::{
    core::{month::ReportingMonth, snapshot::MessSnapshot},
    entities::member,
};
use uuid::Uuid;

/// Figures for one member in one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSettlement {
    /// The member these figures belong to
    pub member: member::Model,
    /// Meals the member logged this month
    pub meals: i64,
    /// Deposits the member made this month (signed)
    pub deposits: f64,
    /// `meals * meal_rate`
    pub meal_cost: f64,
    /// `deposits - meal_cost`; positive means the member gets money back
    pub settlement: f64,
}

/// Whole-mess totals for one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    /// The month the figures were computed for
    pub month: ReportingMonth,
    /// Sum of expense amounts
    pub total_expenses: f64,
    /// Sum of deposit amounts (signed)
    pub total_deposits: f64,
    /// Sum of meal counts
    pub total_meals: i64,
    /// `total_deposits - total_expenses`
    pub remaining_balance: f64,
    /// Per-meal cost shared by every member
    pub meal_rate: f64,
    /// Number of members in the mess
    pub member_count: usize,
}

/// The ledger engine bound to one snapshot and one reporting month.
#[derive(Debug, Clone, Copy)]
pub struct Ledger<'a> {
    snapshot: &'a MessSnapshot,
    month: ReportingMonth,
}

impl<'a> Ledger<'a> {
    /// Creates a ledger over `snapshot` for one reporting month.
    #[must_use]
    pub const fn new(snapshot: &'a MessSnapshot, month: ReportingMonth) -> Self {
        Self { snapshot, month }
    }

    /// The month this ledger reports on.
    #[must_use]
    pub const fn month(&self) -> ReportingMonth {
        self.month
    }

    /// Sum of expense amounts dated in the month; 0 when there are none.
    #[must_use]
    pub fn total_expenses(&self) -> f64 {
        self.snapshot
            .expenses_in(self.month)
            .map(|e| e.amount)
            .sum()
    }

    /// Sum of deposit amounts dated in the month. Adjustments subtract.
    #[must_use]
    pub fn total_deposits(&self) -> f64 {
        self.snapshot
            .deposits_in(self.month)
            .map(|d| d.amount)
            .sum()
    }

    /// Sum of meal counts dated in the month.
    #[must_use]
    pub fn total_meals(&self) -> i64 {
        self.snapshot
            .meal_entries_in(self.month)
            .map(|e| i64::from(e.count))
            .sum()
    }

    /// Total deposits minus total expenses. May be negative.
    #[must_use]
    pub fn remaining_balance(&self) -> f64 {
        self.total_deposits() - self.total_expenses()
    }

    /// Total expenses divided by total meals, or 0 when no meals were logged.
    #[must_use]
    pub fn meal_rate(&self) -> f64 {
        let total_meals = self.total_meals();
        if total_meals <= 0 {
            return 0.0;
        }

        // Meal totals stay far below 2^52, so the conversion is exact.
        #[allow(clippy::cast_precision_loss)]
        let meals = total_meals as f64;
        self.total_expenses() / meals
    }

    /// Meals one member logged in the month.
    #[must_use]
    pub fn member_meals(&self, member_id: Uuid) -> i64 {
        self.snapshot
            .meal_entries_in(self.month)
            .filter(|e| e.member_id == member_id)
            .map(|e| i64::from(e.count))
            .sum()
    }

    /// Deposits one member made in the month.
    #[must_use]
    pub fn member_deposits(&self, member_id: Uuid) -> f64 {
        self.snapshot
            .member_deposits_in(member_id, self.month)
            .map(|d| d.amount)
            .sum()
    }

    /// Member deposits minus the member's share of the meal cost.
    #[must_use]
    pub fn member_settlement(&self, member_id: Uuid) -> f64 {
        self.settle(member_id, self.meal_rate()).3
    }

    /// Figures for every member, in snapshot order.
    ///
    /// The meal rate is computed once and shared by every row.
    #[must_use]
    pub fn settlements(&self) -> Vec<MemberSettlement> {
        let rate = self.meal_rate();
        self.snapshot
            .members
            .iter()
            .map(|member| {
                let (meals, deposits, meal_cost, settlement) = self.settle(member.id, rate);
                MemberSettlement {
                    member: member.clone(),
                    meals,
                    deposits,
                    meal_cost,
                    settlement,
                }
            })
            .collect()
    }

    /// Whole-mess totals for the month.
    #[must_use]
    pub fn summary(&self) -> MonthSummary {
        let total_expenses = self.total_expenses();
        let total_deposits = self.total_deposits();
        MonthSummary {
            month: self.month,
            total_expenses,
            total_deposits,
            total_meals: self.total_meals(),
            remaining_balance: total_deposits - total_expenses,
            meal_rate: self.meal_rate(),
            member_count: self.snapshot.members.len(),
        }
    }

    /// Returns `(meals, deposits, meal_cost, settlement)` for one member at `rate`.
    fn settle(&self, member_id: Uuid, rate: f64) -> (i64, f64, f64, f64) {
        let meals = self.member_meals(member_id);
        let deposits = self.member_deposits(member_id);
        #[allow(clippy::cast_precision_loss)]
        let meal_cost = meals as f64 * rate;
        (meals, deposits, meal_cost, deposits - meal_cost)
    }
}
