//! Payment records and the settlement clock
//!
//! A payment is immutable once recorded except for its status, which models
//! a settlement delay: the status is a pure function of the payment channel
//! and the time elapsed since creation, recomputed from the stored creation
//! timestamp on every refresh. No background timer or external call is
//! involved.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use billing_kernel::{Money, PaymentId};

/// Lifecycle status of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Received, not yet picked up for processing
    Pending,
    /// Being processed by the payment provider
    Processing,
    /// Cleared, queued for posting to the ledger
    ForPosting,
    /// Posted to the ledger (onsite settlement)
    Posted,
    /// Fully settled (online settlement)
    Completed,
    /// Payment failed
    Failed,
    /// Payment was cancelled
    Cancelled,
    /// Payment was refunded
    Refunded,
}

impl PaymentStatus {
    /// True while the payment has not yet settled
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Pending | PaymentStatus::Processing | PaymentStatus::ForPosting
        )
    }

    /// True once the payment has settled successfully
    pub fn is_successful(&self) -> bool {
        matches!(self, PaymentStatus::Posted | PaymentStatus::Completed)
    }

    /// True for states the settlement clock must never overwrite
    pub fn is_terminal_failure(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Failed | PaymentStatus::Cancelled | PaymentStatus::Refunded
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Processing => "Processing",
            PaymentStatus::ForPosting => "For posting",
            PaymentStatus::Posted => "Posted",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Failed => "Failed",
            PaymentStatus::Cancelled => "Cancelled",
            PaymentStatus::Refunded => "Refunded",
        };
        write!(f, "{label}")
    }
}

/// Payment channel, classified from the free-text channel label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentChannel {
    /// Bank or wallet transfer settled by a provider
    Online,
    /// Paid at the cashier's window
    Onsite,
}

impl PaymentChannel {
    /// Minutes before an onsite payment moves from ForPosting to Posted
    pub const ONSITE_POSTED_AFTER_MIN: i64 = 5;
    /// Minutes before an online payment moves from Processing to ForPosting
    pub const ONLINE_FOR_POSTING_AFTER_MIN: i64 = 2;
    /// Minutes before an online payment moves from ForPosting to Completed
    pub const ONLINE_COMPLETED_AFTER_MIN: i64 = 5;

    /// Classifies a free-text channel label
    ///
    /// Labels mentioning "cashier" or "onsite" (any case) are onsite;
    /// everything else is treated as an online channel.
    pub fn classify(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("cashier") || label.contains("onsite") {
            PaymentChannel::Onsite
        } else {
            PaymentChannel::Online
        }
    }

    /// Status assigned to a payment the moment it is recorded
    pub fn initial_status(&self) -> PaymentStatus {
        match self {
            PaymentChannel::Onsite => PaymentStatus::ForPosting,
            PaymentChannel::Online => PaymentStatus::Processing,
        }
    }

    /// The settlement clock: status after `elapsed` time on this channel
    ///
    /// Pure function of channel and elapsed time; the intervals are
    /// half-open, so a payment advances exactly when the threshold is
    /// reached.
    pub fn settled_status(&self, elapsed: Duration) -> PaymentStatus {
        let minutes = elapsed.num_minutes();
        match self {
            PaymentChannel::Onsite => {
                if minutes < Self::ONSITE_POSTED_AFTER_MIN {
                    PaymentStatus::ForPosting
                } else {
                    PaymentStatus::Posted
                }
            }
            PaymentChannel::Online => {
                if minutes < Self::ONLINE_FOR_POSTING_AFTER_MIN {
                    PaymentStatus::Processing
                } else if minutes < Self::ONLINE_COMPLETED_AFTER_MIN {
                    PaymentStatus::ForPosting
                } else {
                    PaymentStatus::Completed
                }
            }
        }
    }
}

impl fmt::Display for PaymentChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentChannel::Online => write!(f, "Online"),
            PaymentChannel::Onsite => write!(f, "Onsite"),
        }
    }
}

/// One recorded payment event
///
/// Immutable except for `status`. The creation timestamp never changes; the
/// settlement clock derives the current status from it on every refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Unique identifier
    pub id: PaymentId,
    /// Payment amount, always positive (validated by the aggregate)
    pub amount: Money,
    /// The channel label exactly as entered (e.g. "BPI ONLINE")
    pub channel_label: String,
    /// Channel classified from the label
    pub channel: PaymentChannel,
    /// External reference (receipt or transaction number)
    pub reference: String,
    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,
    /// Current settlement status
    status: PaymentStatus,
}

impl PaymentRecord {
    /// Creates a new payment record with the channel's initial status
    pub fn new(
        amount: Money,
        channel_label: impl Into<String>,
        reference: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let channel_label = channel_label.into();
        let channel = PaymentChannel::classify(&channel_label);
        Self {
            id: PaymentId::new_v7(),
            amount,
            channel_label,
            channel,
            reference: reference.into(),
            created_at,
            status: channel.initial_status(),
        }
    }

    /// Current settlement status
    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Recomputes the status from the settlement clock
    ///
    /// Safe to call repeatedly; the clock is monotone in elapsed time, so
    /// with a non-decreasing `now` the status only moves forward. Terminal
    /// failure states set by a collaborator are never overwritten.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> PaymentStatus {
        if !self.status.is_terminal_failure() {
            self.status = self.channel.settled_status(now - self.created_at);
        }
        self.status
    }
}
