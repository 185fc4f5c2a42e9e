use thiserror::Error;

/// Everything that can go wrong in the ledger, from bad input to store failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings could not be parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the settings
        message: String,
    },

    /// An expense or deposit amount was rejected
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A meal count was negative
    #[error("Invalid meal count: {count} (must not be negative)")]
    InvalidMealCount {
        /// The rejected count
        count: i32,
    },

    /// A year/month pair does not name a calendar month
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth {
        /// Requested year
        year: i32,
        /// Requested month number
        month: u32,
    },

    /// Any other rejected input, such as a blank name
    #[error("Validation error: {message}")]
    Validation {
        /// Why the input was rejected
        message: String,
    },

    /// The member is not in the loaded records
    #[error("Member not found: {id}")]
    MemberNotFound {
        /// Id of the missing member
        id: String,
    },

    /// The store holds no row with this id
    #[error("No {collection} record with id {id}")]
    RecordNotFound {
        /// Table that was searched
        collection: &'static str,
        /// Id that was looked up
        id: String,
    },

    /// A mutation was attempted while signed out
    #[error("No identity is signed in")]
    NotAuthenticated,

    /// The record store rejected a query or write
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A local file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for input that was rejected before any store call was made.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount { .. }
                | Self::InvalidMealCount { .. }
                | Self::InvalidMonth { .. }
                | Self::Validation { .. }
                | Self::MemberNotFound { .. }
                | Self::NotAuthenticated
        )
    }

    /// True for failures raised by the record store itself.
    #[must_use]
    pub const fn is_store_failure(&self) -> bool {
        matches!(self, Self::Database(_) | Self::RecordNotFound { .. })
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
