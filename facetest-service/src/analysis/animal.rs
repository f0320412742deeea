//! Animal lookalike results.

use super::{parse_reply, rounded, rounded_opt, AnalysisError};
use crate::catalog::{self, AnimalFace};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

const NO_FACE_ID: &str = "none";
const MAX_MATCHING_TRAITS: usize = 3;
const MAX_OTHER_MATCHES: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalAnalysis {
    pub main_match: MainMatch,
    pub other_matches: Vec<AnimalMatch>,
    pub analysis: String,
    pub fun_comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MainMatch {
    pub animal: &'static AnimalFace,
    /// `null` when the model left the score out.
    pub similarity: Option<i64>,
    pub matching_traits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimalMatch {
    pub animal: &'static AnimalFace,
    pub similarity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelReply {
    main_animal_id: String,
    #[serde(default, deserialize_with = "rounded_opt")]
    main_similarity: Option<i64>,
    #[serde(default)]
    matching_traits: Option<Vec<String>>,
    #[serde(default)]
    other_matches: Vec<serde_json::Value>,
    #[serde(default)]
    analysis: String,
    #[serde(default)]
    fun_comment: String,
}

#[derive(Debug, Deserialize)]
struct OtherMatchReply {
    id: String,
    #[serde(deserialize_with = "rounded")]
    similarity: i64,
}

/// Interpret the model's reply.
///
/// Secondary matches that are malformed or name an unknown animal are
/// dropped; an unknown main animal is an error.
pub fn interpret(text: &str) -> Result<AnimalAnalysis, AnalysisError> {
    let value = parse_reply(text)?;
    if value.get("mainAnimalId").and_then(|v| v.as_str()) == Some(NO_FACE_ID) {
        return Err(AnalysisError::NoFace);
    }

    let reply: ModelReply = serde_json::from_value(value)?;
    let main_animal = catalog::find(&reply.main_animal_id)?;

    let matching_traits = reply
        .matching_traits
        .unwrap_or_else(|| main_animal.traits.iter().map(|t| t.to_string()).collect())
        .into_iter()
        .take(MAX_MATCHING_TRAITS)
        .collect();

    let other_matches = reply
        .other_matches
        .into_iter()
        .filter_map(|raw| serde_json::from_value::<OtherMatchReply>(raw).ok())
        .filter(|m| m.id != main_animal.id)
        .filter_map(|m| {
            catalog::find(&m.id).ok().map(|animal| AnimalMatch {
                animal,
                similarity: m.similarity,
            })
        })
        .take(MAX_OTHER_MATCHES)
        .collect();

    Ok(AnimalAnalysis {
        main_match: MainMatch {
            animal: main_animal,
            similarity: reply.main_similarity,
            matching_traits,
        },
        other_matches,
        analysis: reply.analysis,
        fun_comment: reply.fun_comment,
    })
}

/// Fabricate a plausible result: a random animal at 75-94% and two other
/// distinct animals at 60-74%.
pub fn fallback<R: Rng + ?Sized>(rng: &mut R) -> AnimalAnalysis {
    let animals = catalog::all();
    let mut order: Vec<&'static AnimalFace> = animals.iter().collect();
    order.shuffle(rng);

    let main_animal = order[0];
    let name = main_animal.name.to_lowercase();

    let other_matches = order[1..=MAX_OTHER_MATCHES]
        .iter()
        .map(|&animal| AnimalMatch {
            animal,
            similarity: rng.gen_range(60..75),
        })
        .collect();

    AnimalAnalysis {
        main_match: MainMatch {
            animal: main_animal,
            similarity: Some(rng.gen_range(75..95)),
            matching_traits: main_animal
                .traits
                .iter()
                .take(MAX_MATCHING_TRAITS)
                .map(|t| t.to_string())
                .collect(),
        },
        other_matches,
        analysis: format!(
            "Based on our AI analysis, you have the charming {} face! Your {} and {} really stand out.",
            name, main_animal.traits[0], main_animal.traits[1]
        ),
        fun_comment: format!(
            "A {} face? That's adorable! {}",
            name, main_animal.emoji
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FOX_REPLY: &str = r#"Here is my analysis:
```json
{
  "mainAnimalId": "fox",
  "mainSimilarity": 87,
  "matchingTraits": ["slanted eyes", "sharp nose", "slim face", "cunning look"],
  "otherMatches": [
    {"id": "cat", "similarity": 72},
    {"id": "wolf", "similarity": 65.6},
    {"id": "deer", "similarity": 61}
  ],
  "analysis": "Those eyes mean business.",
  "funComment": "Sly and stylish!"
}
```"#;

    #[test]
    fn interprets_well_formed_reply() {
        let result = interpret(FOX_REPLY).unwrap();

        assert_eq!(result.main_match.animal.id, "fox");
        assert_eq!(result.main_match.similarity, Some(87));
        assert_eq!(
            result.main_match.matching_traits,
            vec!["slanted eyes", "sharp nose", "slim face"]
        );
        let others: Vec<_> = result
            .other_matches
            .iter()
            .map(|m| (m.animal.id, m.similarity))
            .collect();
        assert_eq!(others, vec![("cat", 72), ("wolf", 66)]);
        assert_eq!(result.analysis, "Those eyes mean business.");
        assert_eq!(result.fun_comment, "Sly and stylish!");
    }

    #[test]
    fn none_sentinel_means_no_face() {
        let err = interpret(r#"{"mainAnimalId": "none"}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::NoFace));
    }

    #[test]
    fn unknown_main_animal_is_catalog_error() {
        let err = interpret(r#"{"mainAnimalId": "owl", "mainSimilarity": 80}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::Catalog(_)));
    }

    #[test]
    fn missing_traits_default_to_catalog_traits() {
        let result = interpret(r#"{"mainAnimalId": "bear", "mainSimilarity": 90}"#).unwrap();

        assert_eq!(
            result.main_match.matching_traits,
            vec!["round face", "kind eyes", "warm smile"]
        );
        assert!(result.other_matches.is_empty());
        assert_eq!(result.analysis, "");
    }

    #[test]
    fn drops_unresolvable_and_duplicate_secondary_matches() {
        let reply = r#"{
            "mainAnimalId": "puppy",
            "mainSimilarity": 80,
            "otherMatches": [
                {"id": "puppy", "similarity": 79},
                {"id": "unicorn", "similarity": 70},
                {"id": "bunny"},
                {"id": "hamster", "similarity": 68}
            ]
        }"#;
        let result = interpret(reply).unwrap();

        let ids: Vec<_> = result.other_matches.iter().map(|m| m.animal.id).collect();
        assert_eq!(ids, vec!["hamster"]);
    }

    #[test]
    fn missing_similarity_is_kept_as_null() {
        let result = interpret(r#"{"mainAnimalId": "cat", "analysis": "Feline."}"#).unwrap();

        assert_eq!(result.main_match.animal.id, "cat");
        assert_eq!(result.main_match.similarity, None);
        assert_eq!(result.analysis, "Feline.");

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["mainMatch"]["similarity"].is_null());
    }

    #[test]
    fn non_numeric_similarity_is_invalid() {
        let err = interpret(r#"{"mainAnimalId": "cat", "mainSimilarity": "high"}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidJson(_)));
    }

    #[test]
    fn prose_only_reply_is_no_json() {
        let err = interpret("I'm sorry, I can't analyze faces.").unwrap_err();
        assert!(matches!(err, AnalysisError::NoJson));
    }

    #[test]
    fn fallback_respects_ranges_and_distinct_animals() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let result = fallback(&mut rng);

            assert!((75..95).contains(&result.main_match.similarity.unwrap()));
            assert!(catalog::find(result.main_match.animal.id).is_ok());
            assert_eq!(result.other_matches.len(), 2);
            for other in &result.other_matches {
                assert!((60..75).contains(&other.similarity));
                assert_ne!(other.animal.id, result.main_match.animal.id);
            }
            assert_ne!(
                result.other_matches[0].animal.id,
                result.other_matches[1].animal.id
            );
            assert_eq!(result.main_match.matching_traits.len(), 3);
        }
    }

    #[test]
    fn fallback_copy_names_the_animal() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = fallback(&mut rng);
        let animal = result.main_match.animal;

        assert_eq!(
            result.analysis,
            format!(
                "Based on our AI analysis, you have the charming {} face! Your {} and {} really stand out.",
                animal.name.to_lowercase(),
                animal.traits[0],
                animal.traits[1]
            )
        );
        assert!(result.fun_comment.ends_with(animal.emoji));
    }

    #[test]
    fn serializes_in_client_shape() {
        let json = serde_json::to_value(interpret(FOX_REPLY).unwrap()).unwrap();

        assert_eq!(json["mainMatch"]["animal"]["id"], "fox");
        assert_eq!(json["mainMatch"]["similarity"], 87);
        assert!(json["mainMatch"]["matchingTraits"].is_array());
        assert_eq!(json["otherMatches"][0]["animal"]["nameKo"], "고양이상");
        assert_eq!(json["funComment"], "Sly and stylish!");
    }
}
