//! Field checks shared by the request payloads of every entity.

use crate::errors::AppError;

/// Trims `value` and rejects it when blank.
pub fn required(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional value; blank becomes `None`.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses a closed set of stored values, naming the accepted ones on failure.
pub fn one_of<T: Copy>(field: &str, value: &str, choices: &[(&str, T)]) -> Result<T, AppError> {
    choices
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, choice)| *choice)
        .ok_or_else(|| {
            let names: Vec<&str> = choices.iter().map(|(name, _)| *name).collect();
            AppError::Validation(format!(
                "{field} must be one of: {} (got '{value}')",
                names.join(", ")
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims_and_rejects_blank() {
        assert_eq!(required("title", "  Engineer ").unwrap(), "Engineer");
        match required("title", "   ") {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "title is required"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_optional_drops_blank() {
        assert_eq!(optional(Some("  ".to_string())), None);
        assert_eq!(optional(Some(" x ".to_string())), Some("x".to_string()));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn test_one_of_lists_choices() {
        let choices = [("open", 1), ("closed", 2)];
        assert_eq!(one_of("status", "closed", &choices).unwrap(), 2);
        match one_of("status", "archived", &choices) {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("open, closed"));
                assert!(msg.contains("archived"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
