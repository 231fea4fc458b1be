use crate::models::Role;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ChatRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "conversation must be a non-empty array"),
        nested
    )]
    pub conversation: Vec<TurnDto>,

    #[serde(default)]
    pub instruction: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TurnDto {
    #[serde(default)]
    #[validate(custom(function = "validate_role"))]
    pub role: String,

    #[serde(default)]
    #[validate(custom(function = "validate_non_blank"))]
    pub text: String,
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    role.parse::<Role>().map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("role");
        error.message = Some(r#"role must be "user" or "model""#.into());
        error
    })
}

fn validate_non_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        let mut error = ValidationError::new("non_blank");
        error.message = Some("text must be a non-empty string".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(role: &str, text: &str) -> TurnDto {
        TurnDto {
            role: role.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn valid_conversation_passes() {
        let request = ChatRequest {
            conversation: vec![turn("user", "hi"), turn("model", "hello")],
            instruction: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn empty_conversation_fails() {
        assert!(ChatRequest::default().validate().is_err());
    }

    #[test]
    fn unknown_role_fails() {
        let request = ChatRequest {
            conversation: vec![turn("admin", "x")],
            instruction: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn blank_text_fails() {
        assert!(turn("user", "   ").validate().is_err());
    }

    #[test]
    fn role_check_is_case_sensitive() {
        assert!(turn("User", "hi").validate().is_err());
        assert!(turn("model", "hi").validate().is_ok());
    }

    #[test]
    fn turns_serialize_back_to_wire_shape() {
        let json = serde_json::to_value(turn("user", "hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "role": "user", "text": "hi" }));
    }

    #[test]
    fn missing_fields_deserialize_to_invalid_defaults() {
        let request: ChatRequest = serde_json::from_str(r#"{"conversation":[{}]}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
