//! Common validation utilities for collection requests.

use validator::ValidationError;

/// Minimum declared weight of a collection request in kilograms.
pub const MIN_DECLARED_KG: f64 = 1.0;

/// Maximum declared weight of a collection request in kilograms.
pub const MAX_DECLARED_KG: f64 = 10.0;

/// Earliest pickup slot start hour (inclusive).
pub const SLOT_OPEN_HOUR: u32 = 8;

/// Latest pickup slot start hour (exclusive).
pub const SLOT_CLOSE_HOUR: u32 = 18;

/// Validates that a declared total weight is within the accepted range (1 to 10 kg).
pub fn validate_declared_weight(kilograms: f64) -> Result<(), ValidationError> {
    if kilograms < MIN_DECLARED_KG {
        let mut err = ValidationError::new("weight_minimum");
        err.message = Some("Declared weight must be at least 1 kg".into());
        return Err(err);
    }
    if kilograms > MAX_DECLARED_KG {
        let mut err = ValidationError::new("weight_maximum");
        err.message = Some("Declared weight must not exceed 10 kg".into());
        return Err(err);
    }
    Ok(())
}

/// Parses the start hour out of a time slot string such as `"14:00-15:00"`.
///
/// Returns `None` when the slot is not of the `HH:MM-HH:MM` form.
pub fn slot_start_hour(time_slot: &str) -> Option<u32> {
    let (start, _end) = time_slot.split_once('-')?;
    let (hour, minute) = start.trim().split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour)
}

/// Validates that a time slot is well-formed and starts between 08:00 and 18:00.
pub fn validate_time_slot(time_slot: &str) -> Result<(), ValidationError> {
    let Some(hour) = slot_start_hour(time_slot) else {
        let mut err = ValidationError::new("slot_format");
        err.message = Some("Time slot must be of the form HH:MM-HH:MM".into());
        return Err(err);
    };
    if !(SLOT_OPEN_HOUR..SLOT_CLOSE_HOUR).contains(&hour) {
        let mut err = ValidationError::new("slot_hours");
        err.message = Some("Pickup slots must start between 08:00 and 18:00".into());
        return Err(err);
    }
    Ok(())
}

/// Validates that a rejection reason is non-empty.
pub fn validate_rejection_reason(reason: &str) -> Result<(), ValidationError> {
    if reason.trim().is_empty() {
        let mut err = ValidationError::new("reason_empty");
        err.message = Some("A rejection reason is required".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Declared weight tests
    #[test]
    fn test_validate_declared_weight() {
        assert!(validate_declared_weight(1.0).is_ok());
        assert!(validate_declared_weight(10.0).is_ok());
        assert!(validate_declared_weight(5.5).is_ok());
        assert!(validate_declared_weight(0.5).is_err());
        assert!(validate_declared_weight(11.0).is_err());
    }

    #[test]
    fn test_validate_declared_weight_boundaries() {
        assert!(validate_declared_weight(0.999).is_err());
        assert!(validate_declared_weight(10.001).is_err());
        assert!(validate_declared_weight(9.999).is_ok());
    }

    #[test]
    fn test_validate_declared_weight_minimum_message() {
        let err = validate_declared_weight(0.5).unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Declared weight must be at least 1 kg"
        );
    }

    #[test]
    fn test_validate_declared_weight_maximum_message() {
        let err = validate_declared_weight(12.0).unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Declared weight must not exceed 10 kg"
        );
    }

    // Slot parsing tests
    #[test]
    fn test_slot_start_hour() {
        assert_eq!(slot_start_hour("14:00-15:00"), Some(14));
        assert_eq!(slot_start_hour("08:30-09:30"), Some(8));
        assert_eq!(slot_start_hour("8:00-9:00"), Some(8));
        assert_eq!(slot_start_hour("not a slot"), None);
        assert_eq!(slot_start_hour("14:00"), None);
        assert_eq!(slot_start_hour("25:00-26:00"), None);
        assert_eq!(slot_start_hour("14:75-15:00"), None);
    }

    // Time slot tests
    #[test]
    fn test_validate_time_slot() {
        assert!(validate_time_slot("08:00-09:00").is_ok());
        assert!(validate_time_slot("17:00-18:00").is_ok());
        assert!(validate_time_slot("12:30-13:30").is_ok());
        assert!(validate_time_slot("07:00-08:00").is_err());
        assert!(validate_time_slot("18:00-19:00").is_err());
        assert!(validate_time_slot("22:00-23:00").is_err());
    }

    #[test]
    fn test_validate_time_slot_boundary_hours() {
        // 08:xx is the first accepted start, 17:xx the last
        assert!(validate_time_slot("08:00-10:00").is_ok());
        assert!(validate_time_slot("17:59-18:30").is_ok());
        assert!(validate_time_slot("18:01-19:00").is_err());
    }

    #[test]
    fn test_validate_time_slot_malformed_message() {
        let err = validate_time_slot("whenever").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Time slot must be of the form HH:MM-HH:MM"
        );
    }

    #[test]
    fn test_validate_time_slot_out_of_hours_message() {
        let err = validate_time_slot("19:00-20:00").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Pickup slots must start between 08:00 and 18:00"
        );
    }

    // Rejection reason tests
    #[test]
    fn test_validate_rejection_reason() {
        assert!(validate_rejection_reason("materials were not sorted").is_ok());
        assert!(validate_rejection_reason("").is_err());
        assert!(validate_rejection_reason("   ").is_err());
    }

    #[test]
    fn test_validate_rejection_reason_message() {
        let err = validate_rejection_reason("").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "A rejection reason is required"
        );
    }
}
