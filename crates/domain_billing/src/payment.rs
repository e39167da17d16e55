//! Payment records
//!
//! This module handles the immutable record of received payments and the
//! per-contract (or per-group) history they are kept in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, BillingError};

/// A received payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// When the payment was received
    pub timestamp: DateTime<Utc>,
    /// Amount received, always positive
    pub amount: i64,
}

impl PaymentRecord {
    /// Creates a new payment record
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `amount <= 0`
    pub fn new(timestamp: DateTime<Utc>, amount: i64) -> Result<Self, BillingError> {
        ensure_positive(amount, "payment amount")?;
        Ok(Self { timestamp, amount })
    }
}

/// Payments ordered by timestamp
///
/// Records sharing a timestamp stay in the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentHistory {
    records: Vec<PaymentRecord>,
}

impl PaymentHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record after every record with an equal or earlier timestamp
    pub fn record(&mut self, record: PaymentRecord) {
        let position = self
            .records
            .partition_point(|existing| existing.timestamp <= record.timestamp);
        self.records.insert(position, record);
    }

    /// Read-only ordered view of the records
    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all recorded amounts, saturating at `i64::MAX`
    pub fn total(&self) -> i64 {
        self.records
            .iter()
            .fold(0i64, |total, r| total.saturating_add(r.amount))
    }

    /// The most recent record, if any
    pub fn latest(&self) -> Option<&PaymentRecord> {
        self.records.last()
    }
}
