pub mod columns;
pub mod config;
pub mod normalize;
pub mod types;

pub use columns::{column_key, Field};
pub use config::NormalizerConfig;
pub use normalize::{normalize, parse_amount, parse_employee_count, parse_revenue};
pub use types::{NormalizedLead, RawLead, RawRecord, RawValue};
