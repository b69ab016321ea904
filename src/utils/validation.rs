use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::error::{Error, Result};

/// Decodes a request body into `T` and runs its field validators.
pub fn parse_payload<T>(body: Option<&JsonValue>) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    let body = match body {
        Some(JsonValue::Null) | None => {
            return Err(Error::BadRequest(
                "No se recibieron datos en la solicitud".to_string(),
            ))
        }
        Some(body) => body,
    };
    let payload: T = T::deserialize(body)?;
    payload.validate()?;
    Ok(payload)
}

/// Like [`parse_payload`], but an absent body or `{}` is reported as an
/// empty update.
pub fn parse_patch<T>(body: Option<&JsonValue>) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    match body {
        None | Some(JsonValue::Null) => Err(empty_update()),
        Some(JsonValue::Object(map)) if map.is_empty() => Err(empty_update()),
        Some(_) => parse_payload(body),
    }
}

pub fn empty_update() -> Error {
    Error::BadRequest("No se proporcionaron datos para actualizar".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 1))]
        name: String,
    }

    #[test]
    fn missing_body_is_a_bad_request() {
        assert!(matches!(parse_payload::<Probe>(None), Err(Error::BadRequest(_))));
    }

    #[test]
    fn decode_and_validation_errors_are_distinguished() {
        let wrong_type = json!({ "name": 5 });
        assert!(matches!(parse_payload::<Probe>(Some(&wrong_type)), Err(Error::Json(_))));

        let blank = json!({ "name": "" });
        assert!(matches!(parse_payload::<Probe>(Some(&blank)), Err(Error::Validation(_))));

        let ok = json!({ "name": "x" });
        assert_eq!(parse_payload::<Probe>(Some(&ok)).unwrap().name, "x");
    }

    #[test]
    fn empty_object_is_an_empty_update() {
        let empty = json!({});
        let err = parse_patch::<Probe>(Some(&empty)).unwrap_err();
        assert!(err.to_string().contains("No se proporcionaron datos"));
    }
}
