//! Apparent-age results.

use super::{parse_reply, rounded, AnalysisError};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    #[default]
    Medium,
    Low,
}

impl<'de> Deserialize<'de> for ConfidenceLevel {
    /// Case-insensitive; anything unrecognised (or `null`) reads as medium.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "high" => ConfidenceLevel::High,
            "low" => ConfidenceLevel::Low,
            _ => ConfidenceLevel::Medium,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    #[serde(deserialize_with = "rounded")]
    pub min: i64,
    #[serde(deserialize_with = "rounded")]
    pub max: i64,
}

/// Age estimate as sent to the client. Model text fields pass through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeAnalysis {
    #[serde(deserialize_with = "rounded")]
    pub estimated_age: i64,
    #[serde(default)]
    pub confidence_level: ConfidenceLevel,
    /// `null` when the model left the range out.
    #[serde(default)]
    pub age_range: Option<AgeRange>,
    #[serde(default)]
    pub vibe: String,
    #[serde(default)]
    pub fun_fact: String,
    #[serde(default)]
    pub skin_analysis: String,
    #[serde(default)]
    pub style_comment: String,
    #[serde(default)]
    pub celebrity_age_match: String,
}

/// Interpret the model's reply; an estimated age that rounds to 0 means no
/// face.
pub fn interpret(text: &str) -> Result<AgeAnalysis, AnalysisError> {
    let analysis: AgeAnalysis = serde_json::from_value(parse_reply(text)?)?;
    if analysis.estimated_age == 0 {
        return Err(AnalysisError::NoFace);
    }

    Ok(analysis)
}

/// Fabricate a plausible result: an age in 20-49 with a +-3 range.
pub fn fallback<R: Rng + ?Sized>(rng: &mut R) -> AgeAnalysis {
    let age: i64 = rng.gen_range(20..50);

    AgeAnalysis {
        estimated_age: age,
        confidence_level: ConfidenceLevel::Medium,
        age_range: Some(AgeRange {
            min: age - 3,
            max: age + 3,
        }),
        vibe: "Youthful and energetic".to_string(),
        fun_fact: format!(
            "People in their {}s are often at the peak of their creativity!",
            age / 10 * 10
        ),
        skin_analysis: "Your skin has a healthy, natural glow.".to_string(),
        style_comment: "Your style gives off confident, approachable vibes.".to_string(),
        celebrity_age_match: "Timothée Chalamet".to_string(),
    }
}
