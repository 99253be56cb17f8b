use serde_json::Value;

use crate::{error::ApiError, models::MAX_MESSAGE_LEN};

/// Normalises a user id from a request body.
///
/// Accepts a non-empty string or a non-zero integer; integers are kept in their
/// decimal form so they match the `/users/{user_id}` path segment.
pub fn user_id_from_json(value: Option<&Value>) -> Result<String, ApiError> {
    match value {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) if id.is_i64() || id.is_u64() => {
            if id.as_i64() == Some(0) {
                Err(invalid_user_id())
            } else {
                Ok(id.to_string())
            }
        }
        _ => Err(invalid_user_id()),
    }
}

fn invalid_user_id() -> ApiError {
    ApiError::Validation("A valid user id is required.".to_string())
}

/// A room name must be a string that is not blank after trimming.
pub fn room_name_from_json(value: Option<&Value>) -> Result<String, ApiError> {
    match value {
        Some(Value::String(name)) if !name.trim().is_empty() => Ok(name.clone()),
        _ => Err(ApiError::Validation(
            "A valid room name is required.".to_string(),
        )),
    }
}

pub fn user_name_from_json(value: Option<&Value>) -> Result<String, ApiError> {
    match value {
        Some(Value::String(name)) if !name.is_empty() => Ok(name.clone()),
        _ => Err(ApiError::Validation(
            "A valid user name is required.".to_string(),
        )),
    }
}

pub fn message_text_from_json(value: Option<&Value>) -> Result<String, ApiError> {
    let text = match value {
        Some(Value::String(text)) if !text.trim().is_empty() => text,
        _ => {
            return Err(ApiError::Validation(
                "A non-empty message text is required.".to_string(),
            ))
        }
    };

    let len = text.chars().count();
    if len > MAX_MESSAGE_LEN {
        return Err(ApiError::Validation(format!(
            "Message text cannot exceed {MAX_MESSAGE_LEN} characters (got {len})."
        )));
    }

    Ok(text.clone())
}
