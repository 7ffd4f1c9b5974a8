/// Errors raised at the record boundary.
///
/// Everything short of a schema mismatch is absorbed by normalization and
/// surfaces as flags instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadError {
    #[error("malformed record: missing required field(s) {}", .missing.join(", "))]
    MalformedRecord { missing: Vec<String> },
}
