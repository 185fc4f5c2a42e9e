//! Session layer - mediates every mutation between callers and the record store.
//!
//! A [`MessSession`] holds the database connection, the signed-in identity, the
//! selected reporting month, and a [`MessSnapshot`] of that identity's records.
//! Every mutation validates its input, performs its store round trip, and only
//! then merges the stored result into the snapshot. A rejected or failed write
//! therefore never shows up in the snapshot, and nothing is applied
//! optimistically. Failures are logged and returned; there are no retries.

use crate::{
    config::settings::Settings,
    core::{
        deposit, expense,
        ledger::Ledger,
        meal::{self, UpsertOutcome},
        member::{self, MemberDeletion},
        month::ReportingMonth,
        monthly::{self, MonthClearResult},
        report::{self, MemberReport},
        snapshot::MessSnapshot,
    },
    entities::{
        deposit as deposit_entity, expense as expense_entity, meal_entry,
        member as member_entity,
    },
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};
use uuid::Uuid;

/// State for one signed-in (or signed-out) user of the ledger.
pub struct MessSession {
    database: DatabaseConnection,
    settings: Settings,
    owner_id: Option<String>,
    month: ReportingMonth,
    snapshot: MessSnapshot,
}

impl MessSession {
    /// Creates a signed-out session on the current month.
    #[must_use]
    pub fn new(database: DatabaseConnection, settings: Settings) -> Self {
        Self {
            database,
            settings,
            owner_id: None,
            month: ReportingMonth::current(),
            snapshot: MessSnapshot::default(),
        }
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    /// Mess settings this session was created with.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Records loaded for the signed-in identity.
    #[must_use]
    pub const fn snapshot(&self) -> &MessSnapshot {
        &self.snapshot
    }

    /// The selected reporting month.
    #[must_use]
    pub const fn month(&self) -> ReportingMonth {
        self.month
    }

    /// Selects the reporting month. Nothing is reloaded or persisted.
    pub fn set_month(&mut self, month: ReportingMonth) {
        self.month = month;
    }

    /// Moves the reporting month forward by one.
    pub fn next_month(&mut self) {
        self.month = self.month.next();
    }

    /// Moves the reporting month back by one.
    pub fn previous_month(&mut self) {
        self.month = self.month.previous();
    }

    /// The ledger engine over the current snapshot and month.
    #[must_use]
    pub const fn ledger(&self) -> Ledger<'_> {
        Ledger::new(&self.snapshot, self.month)
    }

    /// Member report rows for the current month.
    #[must_use]
    pub fn report(&self) -> Vec<MemberReport> {
        report::member_reports(&self.ledger())
    }

    /// Reacts to sign-in, sign-out, or a switch of account.
    ///
    /// `Some` reloads all four collections for that identity; `None` clears
    /// the snapshot. On a failed reload the session stays signed in with an
    /// empty snapshot so a later [`Self::reload`] can recover.
    pub async fn on_identity_change(&mut self, identity: Option<String>) -> Result<()> {
        self.snapshot.clear();
        self.owner_id = identity;

        if self.owner_id.is_none() {
            info!("Signed out; snapshot cleared");
            return Ok(());
        }
        self.reload().await
    }

    /// Re-reads all four collections for the signed-in identity.
    ///
    /// The snapshot is replaced only when all four reads succeed.
    pub async fn reload(&mut self) -> Result<()> {
        let owner_id = self.require_owner()?.to_string();
        let db = &self.database;

        let loaded = async {
            Ok::<_, Error>(MessSnapshot {
                members: member::list_members(db, &owner_id).await?,
                meal_entries: meal::list_meal_entries(db, &owner_id).await?,
                expenses: expense::list_expenses(db, &owner_id).await?,
                deposits: deposit::list_deposits(db, &owner_id).await?,
            })
        }
        .await
        .inspect_err(|e| error!("Failed to load records for {owner_id}: {e}"))?;

        info!(
            members = loaded.members.len(),
            meal_entries = loaded.meal_entries.len(),
            expenses = loaded.expenses.len(),
            deposits = loaded.deposits.len(),
            "Loaded records for {owner_id}"
        );
        self.snapshot = loaded;
        Ok(())
    }

    /// Adds a member.
    pub async fn add_member(&mut self, name: &str) -> Result<member_entity::Model> {
        let owner_id = self.require_owner()?;
        member::validate_member_name(name).inspect_err(log_rejection)?;

        let created = member::create_member(&self.database, owner_id, name)
            .await
            .inspect_err(log_store_failure)?;

        self.snapshot.push_member(created.clone());
        info!("Added member '{}'", created.name);
        Ok(created)
    }

    /// Removes a member with their meal entries and deposits.
    ///
    /// On failure the snapshot keeps the member; calling again finishes any
    /// steps that did not run.
    pub async fn delete_member(&mut self, member_id: Uuid) -> Result<MemberDeletion> {
        let owner_id = self.require_owner()?;

        let deletion = member::delete_member(&self.database, owner_id, member_id)
            .await
            .inspect_err(log_store_failure)?;

        self.snapshot.remove_member(member_id);
        Ok(deletion)
    }

    /// Records a deposit made today for the selected month.
    pub async fn add_deposit(
        &mut self,
        member_id: Uuid,
        amount: f64,
    ) -> Result<deposit_entity::Model> {
        self.add_deposit_on(member_id, amount, Utc::now().date_naive())
            .await
    }

    /// Records a deposit made on `today` for the selected month.
    ///
    /// The deposit keeps today's day number but takes the year and month of
    /// the reporting month, so it always counts toward the month on screen.
    pub async fn add_deposit_on(
        &mut self,
        member_id: Uuid,
        amount: f64,
        today: NaiveDate,
    ) -> Result<deposit_entity::Model> {
        let owner_id = self.require_owner()?;
        deposit::validate_deposit_amount(amount).inspect_err(log_rejection)?;
        self.require_member(member_id)?;

        let date = self.month.pin_day(today);
        let created = deposit::create_deposit(&self.database, owner_id, member_id, date, amount)
            .await
            .inspect_err(log_store_failure)?;

        self.snapshot.push_deposit(created.clone());
        Ok(created)
    }

    /// Sets a member's meal count for one day, creating or overwriting the entry.
    pub async fn log_meals(
        &mut self,
        member_id: Uuid,
        date: NaiveDate,
        count: i32,
    ) -> Result<meal_entry::Model> {
        let owner_id = self.require_owner()?;
        meal::validate_meal_count(count).inspect_err(log_rejection)?;
        self.require_member(member_id)?;

        if count > self.settings.max_daily_meals {
            warn!(
                "Meal count {count} exceeds the usual daily maximum of {}",
                self.settings.max_daily_meals
            );
        }

        let (entry, outcome) =
            meal::upsert_meal_entry(&self.database, owner_id, member_id, date, count)
                .await
                .inspect_err(log_store_failure)?;

        if outcome == UpsertOutcome::Created {
            info!("Logged {count} meals on {date}");
        }
        self.snapshot.upsert_meal_entry(entry.clone());
        Ok(entry)
    }

    /// Records a shared expense.
    pub async fn add_expense(
        &mut self,
        date: NaiveDate,
        amount: f64,
        description: &str,
    ) -> Result<expense_entity::Model> {
        let owner_id = self.require_owner()?;
        expense::validate_expense(amount, description).inspect_err(log_rejection)?;

        let created =
            expense::create_expense(&self.database, owner_id, date, amount, description)
                .await
                .inspect_err(log_store_failure)?;

        self.snapshot.push_expense(created.clone());
        Ok(created)
    }

    /// Irreversibly removes the selected month's meal entries, expenses, and
    /// deposits, using the configured clear strategy.
    pub async fn clear_month(&mut self) -> Result<MonthClearResult> {
        let owner_id = self.require_owner()?;
        let month = self.month;

        let result = monthly::clear_month_with(
            &self.database,
            owner_id,
            month,
            self.settings.clear_strategy,
        )
        .await
        .inspect_err(|e| error!("Clearing {month} failed, retry to finish: {e}"))?;

        self.snapshot.remove_month(month);
        Ok(result)
    }

    fn require_owner(&self) -> Result<&str> {
        self.owner_id.as_deref().ok_or_else(|| {
            warn!("Rejected mutation: no identity is signed in");
            Error::NotAuthenticated
        })
    }

    fn require_member(&self, member_id: Uuid) -> Result<()> {
        if self.snapshot.member(member_id).is_none() {
            let err = Error::MemberNotFound {
                id: member_id.to_string(),
            };
            log_rejection(&err);
            return Err(err);
        }
        Ok(())
    }
}

fn log_rejection(err: &Error) {
    warn!("Rejected input: {err}");
}

fn log_store_failure(err: &Error) {
    error!("Store rejected write: {err}");
}
