//! Body decoding shared by single calls and batch sub-responses.

use super::{Article, Classified, Frontpage, Images, Model, Products};
use crate::protocol::ApiKind;
use crate::{Error, ErrorContext, Result};
use serde_json::Value;

const APPLICATION_JSON: &str = "application/json";

/// Decode a raw response body according to the declared result kind.
///
/// JSON APIs report application errors inline (`errorCode`/`error`), which become
/// [`Error::Api`]. The frontpage API answers in DML on success and switches to a JSON
/// envelope (`statusCode`/`message`) on error, so its content type decides the branch.
pub fn decode(kind: ApiKind, content_type: Option<&str>, body: &str) -> Result<Model> {
    match kind {
        ApiKind::Frontpage => decode_frontpage(content_type, body).map(Model::Frontpage),
        _ => decode_json(kind, body),
    }
}

fn decode_json(kind: ApiKind, body: &str) -> Result<Model> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        Error::parse_with_context(
            format!("the JSON {} response cannot be parsed: {}", kind, e),
            ErrorContext::new().with_source("decode"),
        )
    })?;

    if let Some(code) = value.get("errorCode").and_then(Value::as_i64) {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default();
        return Err(Error::api(code, message));
    }

    let model = match kind {
        ApiKind::Article => Model::Article(serde_json::from_value::<Article>(value)?),
        ApiKind::Images => Model::Images(serde_json::from_value::<Images>(value)?),
        ApiKind::Products => Model::Products(serde_json::from_value::<Products>(value)?),
        ApiKind::Classifier => Model::Classified(Classified::from_value(value)?),
        ApiKind::Frontpage => unreachable!("frontpage bodies are DML"),
    };
    Ok(model)
}

fn decode_frontpage(content_type: Option<&str>, body: &str) -> Result<Frontpage> {
    let is_json = content_type
        .map(|ct| ct.contains(APPLICATION_JSON))
        .unwrap_or(false);

    if is_json {
        let envelope: Value = serde_json::from_str(body).map_err(|e| {
            Error::parse_with_context(
                format!("the frontpage API returned an error that cannot be parsed: {}", e),
                ErrorContext::new().with_source("decode"),
            )
        })?;
        let code = envelope
            .get("statusCode")
            .and_then(Value::as_i64)
            .ok_or_else(|| {
                Error::parse_with_context(
                    "the frontpage API returned an error without statusCode",
                    ErrorContext::new()
                        .with_field_path("statusCode")
                        .with_source("decode"),
                )
            })?;
        let message = envelope
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default();
        return Err(Error::api(code, message));
    }

    quick_xml::de::from_str(body).map_err(|e| {
        Error::parse_with_context(
            format!("the DML response cannot be parsed: {}", e),
            ErrorContext::new().with_source("decode"),
        )
    })
}
