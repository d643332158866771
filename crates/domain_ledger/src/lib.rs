//! Ledger Domain - Student Billing Core
//!
//! This crate implements the financial ledger for one student in one term:
//! assessed fee lines, recorded payments, derived balance and overpayment,
//! and examination eligibility gated on cumulative payment thresholds.
//!
//! # Invariants
//!
//! - Money is never double-counted: `amount_paid` is a monotone cumulative
//!   sum of recorded payment amounts.
//! - Payment allocation over fee lines is deterministic FIFO in insertion
//!   order.
//! - `balance` and `overpayment` are both non-negative and mutually
//!   exclusive (at most one non-zero). A violation is a bug in the
//!   allocation algorithm and aborts rather than being coerced.
//! - Payment status evolves only forward with elapsed wall-clock time,
//!   recomputed from the immutable creation timestamp (no timers).
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{LedgerAccount, BillingPolicy};
//!
//! let mut account = LedgerAccount::new(student, term, BillingPolicy::default());
//! account.add_fee(tuition);
//! let result = account.record_payment(amount, "BPI ONLINE", "REF-1001");
//! assert!(result.success);
//! ```

pub mod account;
pub mod eligibility;
pub mod error;
pub mod fee;
pub mod payment;
pub mod policy;
pub mod ports;

pub use account::{FeeLineView, LedgerAccount, PaymentView};
pub use eligibility::{Eligibility, EligibilityEvaluator, ExamFlags, ExamPeriod};
pub use error::{LedgerError, PaymentResult};
pub use fee::{FeeCategory, FeeLine, FeeLineState};
pub use payment::{PaymentChannel, PaymentRecord, PaymentStatus};
pub use policy::BillingPolicy;
pub use ports::{AuditSink, LedgerRepository};
