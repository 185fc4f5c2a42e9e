//! In-memory mirror of one owner's four collections.
//!
//! The session merges store results into a snapshot only after the store has
//! accepted a write, so a snapshot always reflects some prefix of accepted
//! writes. The ledger engine reads from it and never mutates it.

use crate::{
    core::month::ReportingMonth,
    entities::{deposit, expense, meal_entry, member},
};
use chrono::NaiveDate;
use uuid::Uuid;

/// The four collections loaded for one identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessSnapshot {
    /// Members, in store order (oldest first)
    pub members: Vec<member::Model>,
    /// Meal entries, at most one per (member, date)
    pub meal_entries: Vec<meal_entry::Model>,
    /// Shared expenses
    pub expenses: Vec<expense::Model>,
    /// Member deposits
    pub deposits: Vec<deposit::Model>,
}

impl MessSnapshot {
    /// Returns true when no collection holds any row.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
            && self.meal_entries.is_empty()
            && self.expenses.is_empty()
            && self.deposits.is_empty()
    }

    /// Finds a member by id.
    #[must_use]
    pub fn member(&self, member_id: Uuid) -> Option<&member::Model> {
        self.members.iter().find(|m| m.id == member_id)
    }

    /// Finds the entry for a (member, date) pair, if one exists.
    #[must_use]
    pub fn meal_entry(&self, member_id: Uuid, date: NaiveDate) -> Option<&meal_entry::Model> {
        self.meal_entries
            .iter()
            .find(|e| e.member_id == member_id && e.date == date)
    }

    /// Meal count shown in the per-day grid; 0 when nothing was logged.
    #[must_use]
    pub fn meal_count(&self, member_id: Uuid, date: NaiveDate) -> i32 {
        self.meal_entry(member_id, date).map_or(0, |e| e.count)
    }

    /// Appends a stored member.
    pub fn push_member(&mut self, member: member::Model) {
        self.members.push(member);
    }

    /// Appends a stored expense.
    pub fn push_expense(&mut self, expense: expense::Model) {
        self.expenses.push(expense);
    }

    /// Appends a stored deposit.
    pub fn push_deposit(&mut self, deposit: deposit::Model) {
        self.deposits.push(deposit);
    }

    /// Merges a stored meal entry, replacing any row with the same id or the
    /// same (member, date) pair so the pair stays unique.
    pub fn upsert_meal_entry(&mut self, entry: meal_entry::Model) {
        if let Some(existing) = self.meal_entries.iter_mut().find(|e| {
            e.id == entry.id || (e.member_id == entry.member_id && e.date == entry.date)
        }) {
            *existing = entry;
        } else {
            self.meal_entries.push(entry);
        }
    }

    /// Drops a member together with their meal entries and deposits.
    pub fn remove_member(&mut self, member_id: Uuid) {
        self.members.retain(|m| m.id != member_id);
        self.meal_entries.retain(|e| e.member_id != member_id);
        self.deposits.retain(|d| d.member_id != member_id);
    }

    /// Drops every dated record inside `month`. Members are untouched.
    pub fn remove_month(&mut self, month: ReportingMonth) {
        self.meal_entries.retain(|e| !month.contains(e.date));
        self.expenses.retain(|e| !month.contains(e.date));
        self.deposits.retain(|d| !month.contains(d.date));
    }

    /// Drops every record, as on sign-out.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Expenses of `month`, in snapshot order.
    pub fn expenses_in(&self, month: ReportingMonth) -> impl Iterator<Item = &expense::Model> {
        self.expenses.iter().filter(move |e| month.contains(e.date))
    }

    /// Deposits of `month`, in snapshot order.
    pub fn deposits_in(&self, month: ReportingMonth) -> impl Iterator<Item = &deposit::Model> {
        self.deposits.iter().filter(move |d| month.contains(d.date))
    }

    /// Meal entries of `month`, in snapshot order.
    pub fn meal_entries_in(
        &self,
        month: ReportingMonth,
    ) -> impl Iterator<Item = &meal_entry::Model> {
        self.meal_entries
            .iter()
            .filter(move |e| month.contains(e.date))
    }

    /// Deposits one member made in `month`.
    pub fn member_deposits_in(
        &self,
        member_id: Uuid,
        month: ReportingMonth,
    ) -> impl Iterator<Item = &deposit::Model> {
        self.deposits_in(month)
            .filter(move |d| d.member_id == member_id)
    }
}
