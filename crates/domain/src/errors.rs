//! Domain error taxonomy.
//!
//! Every operation in the core reports failures through [`DomainError`].
//! Errors are synchronous and surfaced to the immediate caller; the core
//! never auto-corrects input and never retries on its own.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Insufficient points: balance is {balance}, {required} required")]
    InsufficientPoints { balance: f64, required: f64 },

    #[error("No reward tier matches {0} points")]
    InvalidRewardTier(f64),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value for {field}"))
                })
            })
            .collect();

        let message = if messages.len() == 1 {
            messages.into_iter().next().unwrap_or_default()
        } else {
            format!("{} validation errors", messages.len())
        };

        DomainError::Validation(message)
    }
}

impl From<validator::ValidationError> for DomainError {
    fn from(error: validator::ValidationError) -> Self {
        DomainError::Validation(
            error
                .message
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_display() {
        assert_eq!(
            format!("{}", DomainError::Validation("bad weight".to_string())),
            "Validation error: bad weight"
        );
        assert_eq!(
            format!("{}", DomainError::NotFound("collection 42".to_string())),
            "Not found: collection 42"
        );
        assert_eq!(
            format!("{}", DomainError::InvalidState("already validated".to_string())),
            "Invalid state: already validated"
        );
        assert_eq!(
            format!("{}", DomainError::Forbidden("collector role required".to_string())),
            "Forbidden: collector role required"
        );
    }

    #[test]
    fn test_insufficient_points_display() {
        let err = DomainError::InsufficientPoints {
            balance: 50.0,
            required: 100.0,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient points: balance is 50, 100 required"
        );
    }

    #[test]
    fn test_invalid_reward_tier_display() {
        assert_eq!(
            DomainError::InvalidRewardTier(150.0).to_string(),
            "No reward tier matches 150 points"
        );
    }

    #[test]
    fn test_from_validation_error_uses_message() {
        let mut err = validator::ValidationError::new("weight_minimum");
        err.message = Some("Declared weight must be at least 1 kg".into());
        let domain: DomainError = err.into();
        match domain {
            DomainError::Validation(msg) => {
                assert_eq!(msg, "Declared weight must be at least 1 kg");
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_validation_error_falls_back_to_code() {
        let err = validator::ValidationError::new("slot_hours");
        let domain: DomainError = err.into();
        match domain {
            DomainError::Validation(msg) => assert_eq!(msg, "slot_hours"),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }
}
