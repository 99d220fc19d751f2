use std::fmt;

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors surfaced by the ledger core.
///
/// Validation variants are recoverable and reported to the submitting
/// caller; `InvalidChainState` is fatal and halts further mining.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A required transaction field was missing or empty.
    MissingField(&'static str),
    /// Submitted transaction amount was zero, negative or not a number.
    NonPositiveAmount,
    /// The chain was empty when a block append was attempted.
    InvalidChainState,
}

impl LedgerError {
    /// True for errors the caller can fix by resubmitting corrected input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::MissingField(_) | LedgerError::NonPositiveAmount
        )
    }
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::MissingField(field) => write!(f, "missing required field: {field}"),
            LedgerError::NonPositiveAmount => write!(f, "amount must be greater than zero"),
            LedgerError::InvalidChainState => {
                write!(f, "chain is empty; genesis must precede mining")
            }
        }
    }
}

impl std::error::Error for LedgerError {}

#[cfg(test)]
mod tests {
    use super::LedgerError;

    #[test]
    fn validation_classification() {
        assert!(LedgerError::MissingField("toAddress").is_validation());
        assert!(LedgerError::NonPositiveAmount.is_validation());
        assert!(!LedgerError::InvalidChainState.is_validation());
    }

    #[test]
    fn display_names_the_field() {
        let msg = LedgerError::MissingField("fromAddress").to_string();
        assert!(msg.contains("fromAddress"));
    }
}
