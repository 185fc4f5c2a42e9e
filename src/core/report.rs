//! Report generation business logic.
//!
//! This module turns ledger figures into per-member report rows with a remark,
//! and renders plain-text summaries. Two-decimal rounding happens only here,
//! at display time; the ledger values themselves are never rounded.

use crate::core::ledger::{Ledger, MemberSettlement, MonthSummary};
use std::fmt::Write;

/// What a member's settlement means for them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Remark {
    /// The mess owes the member this much
    WillGetBack(f64),
    /// The member owes the mess this much
    NeedsToPay(f64),
    /// Exactly settled
    Balanced,
}

impl Remark {
    /// Classifies a settlement. Only an exact zero counts as balanced.
    #[must_use]
    pub fn from_settlement(settlement: f64) -> Self {
        if settlement > 0.0 {
            Self::WillGetBack(settlement)
        } else if settlement < 0.0 {
            Self::NeedsToPay(settlement.abs())
        } else {
            Self::Balanced
        }
    }

    /// Renders the remark with the mess currency symbol.
    #[must_use]
    pub fn describe(&self, currency_symbol: &str) -> String {
        match self {
            Self::WillGetBack(amount) => {
                format!("Will get back {}", format_money(currency_symbol, *amount))
            }
            Self::NeedsToPay(amount) => {
                format!("Needs to pay {}", format_money(currency_symbol, *amount))
            }
            Self::Balanced => "Balanced".to_string(),
        }
    }
}

/// One row of the members report.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberReport {
    /// Ledger figures for the member
    pub figures: MemberSettlement,
    /// Classification of the settlement
    pub remark: Remark,
}

impl MemberReport {
    /// The member's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.figures.member.name
    }
}

/// Builds the members report for the ledger's month, in member order.
#[must_use]
pub fn member_reports(ledger: &Ledger<'_>) -> Vec<MemberReport> {
    ledger
        .settlements()
        .into_iter()
        .map(|figures| MemberReport {
            remark: Remark::from_settlement(figures.settlement),
            figures,
        })
        .collect()
}

/// Formats an amount with two decimals, e.g. `৳12.50` or `-৳3.00`.
#[must_use]
pub fn format_money(currency_symbol: &str, amount: f64) -> String {
    if amount < 0.0 {
        format!("-{currency_symbol}{:.2}", amount.abs())
    } else {
        format!("{currency_symbol}{amount:.2}")
    }
}

/// Renders the month totals as a short multi-line block.
#[must_use]
pub fn format_month_summary(
    mess_name: &str,
    summary: &MonthSummary,
    currency_symbol: &str,
) -> String {
    let money = |amount| format_money(currency_symbol, amount);
    let mut out = format!("{mess_name} - {}\n", summary.month);

    // write! is infallible when writing to String
    let _ = writeln!(
        out,
        "  Members: {} | Meals: {} | Meal rate: {}",
        summary.member_count,
        summary.total_meals,
        money(summary.meal_rate)
    );
    let _ = writeln!(
        out,
        "  Deposits: {} | Expenses: {} | Remaining: {}",
        money(summary.total_deposits),
        money(summary.total_expenses),
        money(summary.remaining_balance)
    );
    out
}

/// Renders the members report as an aligned text table.
#[must_use]
pub fn format_member_table(reports: &[MemberReport], currency_symbol: &str) -> String {
    let money = |amount| format_money(currency_symbol, amount);
    let name_width = reports
        .iter()
        .map(|r| r.name().chars().count())
        .max()
        .unwrap_or(0)
        .max("Member".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$} | {:>5} | {:>12} | {:>12} | {:>12} | Remarks",
        "Member", "Meals", "Deposit", "Meal cost", "Balance"
    );
    for report in reports {
        let f = &report.figures;
        let _ = writeln!(
            out,
            "{:<name_width$} | {:>5} | {:>12} | {:>12} | {:>12} | {}",
            report.name(),
            f.meals,
            money(f.deposits),
            money(f.meal_cost),
            money(f.settlement),
            report.remark.describe(currency_symbol)
        );
    }
    out
}
