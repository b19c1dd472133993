//! CloudWatch Logs filter pattern generation
//!
//! Patterns are JSON-path equality clauses joined with `&&` inside a single
//! block. Multiple values for one predicate field become a parenthesized
//! `||` group.
//!
//! # Example
//!
//! ```text
//! { $.evt = "delivered" && $.src = "mailer" && ($.mailer_class = "UserMailer" || $.mailer_class = "AdminMailer") }
//! ```
//!
//! # Predicate terms
//!
//! ```text
//! field:value          Require field == value
//! field:a field:b      Same field repeated combines with OR
//! ```

pub mod compiler;
pub mod error;
pub mod predicates;

pub use compiler::{EVENT_KEY, SOURCE_KEY, compile_pattern, escape};
pub use error::PredicateParseError;
pub use predicates::{PredicateSet, PredicateTerm};
