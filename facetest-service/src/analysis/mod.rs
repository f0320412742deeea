//! Turning free-text model replies into results.
//!
//! The model is asked for JSON but answers in prose more often than not, so
//! the first `{` through the last `}` is cut out and parsed. Any failure
//! except the explicit "no face" sentinel is recoverable: the caller serves
//! a fabricated result instead.

pub mod age;
pub mod animal;

use crate::catalog::CatalogError;
use crate::services::providers::{GenerationParams, ProviderError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub const NO_FACE_MESSAGE: &str =
    "Couldn't detect a face in the photo. Please upload a clear selfie!";

static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[\s\S]*\}").expect("JSON object pattern is valid"));

/// The two face tests offered by the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    Animal,
    Age,
}

impl TestKind {
    pub fn label(&self) -> &'static str {
        match self {
            TestKind::Animal => "animal",
            TestKind::Age => "age",
        }
    }

    pub fn params(&self) -> GenerationParams {
        match self {
            TestKind::Animal => GenerationParams {
                temperature: 0.8,
                max_output_tokens: 768,
            },
            TestKind::Age => GenerationParams {
                temperature: 0.7,
                max_output_tokens: 512,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No face detected in the photo")]
    NoFace,

    #[error("Model reply contained no JSON object")]
    NoJson,

    #[error("Model reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl AnalysisError {
    /// Short label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            AnalysisError::NoFace => "no_face",
            AnalysisError::NoJson => "no_json",
            AnalysisError::InvalidJson(_) => "invalid_json",
            AnalysisError::Catalog(_) => "unknown_animal",
            AnalysisError::Provider(err) => err.kind(),
        }
    }
}

/// Cut the outermost brace-delimited span out of a model reply.
pub fn extract_json_object(text: &str) -> Result<&str, AnalysisError> {
    JSON_OBJECT
        .find(text)
        .map(|m| m.as_str())
        .ok_or(AnalysisError::NoJson)
}

/// Parse the extracted object as loosely-typed JSON so sentinels can be
/// checked before the strict shape is enforced.
fn parse_reply(text: &str) -> Result<serde_json::Value, AnalysisError> {
    Ok(serde_json::from_str(extract_json_object(text)?)?)
}

/// Accept any JSON number and round it, since the model sometimes answers
/// `87.5` where an integer was asked for.
fn rounded<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() {
        return Err(serde::de::Error::custom("number is not finite"));
    }
    Ok(value.round() as i64)
}

/// [`rounded`] for fields the model may leave out or send as `null`.
fn rounded_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Rounded(#[serde(deserialize_with = "rounded")] i64);

    Ok(Option::<Rounded>::deserialize(deserializer)?.map(|Rounded(value)| value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_from_fenced_reply() {
        let reply = "Sure! Here you go:\n```json\n{\"a\": {\"b\": 1}}\n```\nEnjoy!";
        assert_eq!(extract_json_object(reply).unwrap(), "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn extraction_spans_first_to_last_brace() {
        let reply = "{\"a\": 1}\nand also {\"b\": 2}";
        assert_eq!(extract_json_object(reply).unwrap(), reply);
        assert!(parse_reply(reply).is_err());
    }

    #[test]
    fn reply_without_braces_is_no_json() {
        assert!(matches!(
            extract_json_object("I cannot help with that."),
            Err(AnalysisError::NoJson)
        ));
        assert!(matches!(
            extract_json_object(""),
            Err(AnalysisError::NoJson)
        ));
    }

    #[test]
    fn sampling_parameters_per_test() {
        assert_eq!(TestKind::Animal.params().temperature, 0.8);
        assert_eq!(TestKind::Animal.params().max_output_tokens, 768);
        assert_eq!(TestKind::Age.params().temperature, 0.7);
        assert_eq!(TestKind::Age.params().max_output_tokens, 512);
    }

    #[test]
    fn reasons_are_stable_labels() {
        assert_eq!(AnalysisError::NoJson.reason(), "no_json");
        assert_eq!(
            AnalysisError::from(ProviderError::RateLimited).reason(),
            "rate_limited"
        );
        assert_eq!(
            AnalysisError::from(CatalogError::UnknownAnimal("owl".into())).reason(),
            "unknown_animal"
        );
    }
}
