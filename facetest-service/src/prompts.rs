//! Instruction prompts sent alongside the photo.

use crate::catalog::AnimalFace;

/// Build the animal-lookalike prompt, listing every candidate the model may
/// choose from.
pub fn animal_prompt(animals: &[AnimalFace]) -> String {
    let animal_list = animals
        .iter()
        .map(|animal| {
            format!(
                "- {}: {} ({}) - traits: {}",
                animal.id,
                animal.name,
                animal.name_ko,
                animal.traits.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an expert AI at analyzing facial features and matching people to their animal lookalike!

## Available Animal Types
{animal_list}

## Analysis Guidelines
1. Carefully analyze the facial features of the person in the photo
2. Match them to the most fitting animal based on:
   - Eye shape (round, sharp, slanted, big, small)
   - Face shape (round, long, slim, angular)
   - Overall vibe (cute, cool, fierce, elegant, innocent)
   - Specific features (cheeks, nose, jawline)
3. Be fun and positive! This is for entertainment
4. Select the TOP 3 matching animals with percentages

## Response Format (JSON only)
{{
  "mainAnimalId": "most matching animal id (from list above)",
  "mainSimilarity": similarity percentage (60-95),
  "matchingTraits": ["trait 1", "trait 2", "trait 3"],
  "otherMatches": [
    {{"id": "second best animal id", "similarity": %}},
    {{"id": "third best animal id", "similarity": %}}
  ],
  "analysis": "Fun analysis of their features (2-3 sentences)",
  "funComment": "A witty one-liner comment"
}}

If no face is visible, set mainAnimalId to "none"."#
    )
}

pub const AGE_PROMPT: &str = r#"You are an expert AI at analyzing facial features and estimating age!

## Task
Analyze the person in the photo and estimate their age. Be fun and playful!

## Guidelines
1. Look at skin texture, facial structure, and overall appearance
2. Consider that Asian faces often look younger than their actual age
3. Give a specific age estimate (not a range)
4. Be positive and fun - this is for entertainment!
5. Provide a "vibe" description (e.g., "youthful energy", "mature elegance")

## Response Format (JSON only)
{
  "estimatedAge": number (your best guess),
  "confidenceLevel": "high" | "medium" | "low",
  "ageRange": { "min": number, "max": number },
  "vibe": "short description of their vibe/energy",
  "funFact": "a fun fact about people who look this age",
  "skinAnalysis": "brief comment on skin (positive tone)",
  "styleComment": "comment on their style/appearance (positive)",
  "celebrityAgeMatch": "a celebrity who looks similar age"
}

If no face is detected, set estimatedAge to 0."#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn animal_prompt_lists_every_candidate() {
        let prompt = animal_prompt(catalog::all());

        for animal in catalog::all() {
            assert!(prompt.contains(&format!("- {}: {} ({})", animal.id, animal.name, animal.name_ko)));
        }
        assert!(prompt.contains(
            "- puppy: Puppy (강아지상) - traits: round eyes, soft features, innocent look, cute cheeks"
        ));
    }

    #[test]
    fn animal_prompt_describes_response_shape_and_sentinel() {
        let prompt = animal_prompt(catalog::all());

        assert!(prompt.contains(r#""mainAnimalId": "most matching animal id (from list above)""#));
        assert!(prompt.contains(r#"{"id": "second best animal id", "similarity": %}"#));
        assert!(prompt.ends_with(r#"If no face is visible, set mainAnimalId to "none"."#));
    }

    #[test]
    fn animal_prompt_is_deterministic() {
        assert_eq!(animal_prompt(catalog::all()), animal_prompt(catalog::all()));
    }

    #[test]
    fn age_prompt_carries_heuristics_and_sentinel() {
        assert!(AGE_PROMPT.contains("Asian faces often look younger than their actual age"));
        assert!(AGE_PROMPT.contains(r#""confidenceLevel": "high" | "medium" | "low""#));
        assert!(AGE_PROMPT.ends_with("If no face is detected, set estimatedAge to 0."));
    }
}
