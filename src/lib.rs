//! Rule-based lead scoring.
//!
//! A raw lead row is normalized into canonical values, then scored by an
//! additive, clamped rule table and checked for data-integrity issues:
//!
//! ```
//! use lead_bro::lead::{RawLead, RawValue};
//! use lead_bro::pipeline::{evaluate, Rules};
//! use lead_bro::scoring::Flag;
//!
//! let raw = RawLead {
//!     industry: "SaaS".into(),
//!     employee_count: RawValue::Number(50.0),
//!     revenue: "$2M".into(),
//!     owner_title: "CEO".into(),
//!     owner_email: "a@b.com".into(),
//!     ..RawLead::default()
//! };
//! let result = evaluate(&raw, &Rules::default());
//! assert_eq!(result.score, 80);
//! assert!(result.has_flag(Flag::BlankLinkedin));
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod input;
pub mod lead;
pub mod output;
pub mod pipeline;
pub mod scoring;

pub use error::LeadError;
pub use lead::{normalize, NormalizedLead, RawLead};
pub use pipeline::{evaluate, evaluate_batch, Rules};
pub use scoring::{score, Flag, ScoreResult};
