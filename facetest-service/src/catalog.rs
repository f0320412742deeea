//! The fixed catalog of animal face types.
//!
//! The model is asked to answer with one of these ids; anything it returns
//! is resolved back to a record here before reaching the client.

use serde::Serialize;
use thiserror::Error;

/// One animal lookalike type with its display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalFace {
    pub id: &'static str,
    pub name: &'static str,
    pub name_ko: &'static str,
    pub emoji: &'static str,
    pub traits: &'static [&'static str],
    pub description: &'static str,
    pub fun_fact: &'static str,
    pub celeb_examples: &'static [&'static str],
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown animal id: {0}")]
    UnknownAnimal(String),
}

pub static ANIMAL_FACES: [AnimalFace; 10] = [
    AnimalFace {
        id: "puppy",
        name: "Puppy",
        name_ko: "강아지상",
        emoji: "🐶",
        traits: &["round eyes", "soft features", "innocent look", "cute cheeks"],
        description: "You have the adorable, lovable puppy face! Your round eyes and soft features make everyone want to protect you. People naturally trust you and feel comfortable around you.",
        fun_fact: "Puppy-faced people are often the most popular in friend groups - everyone wants to be close to them!",
        celeb_examples: &["Cha Eun-woo", "Kim Sejeong", "Park Bo-young"],
    },
    AnimalFace {
        id: "cat",
        name: "Cat",
        name_ko: "고양이상",
        emoji: "🐱",
        traits: &["sharp eyes", "small face", "mysterious aura", "elegant features"],
        description: "You have the alluring cat face! Your sharp, mysterious eyes and elegant features give off a cool, independent vibe. People find you intriguing and want to know more about you.",
        fun_fact: "Cat-faced people often have a secret playful side that only close friends get to see!",
        celeb_examples: &["Jennie (BLACKPINK)", "Han So-hee", "Lee Dong-wook"],
    },
    AnimalFace {
        id: "fox",
        name: "Fox",
        name_ko: "여우상",
        emoji: "🦊",
        traits: &["slanted eyes", "sharp nose", "cunning look", "slim face"],
        description: "You have the clever fox face! Your slanted eyes and sharp features radiate intelligence and charm. You appear sophisticated and always seem to be one step ahead.",
        fun_fact: "Fox-faced people are natural charmers - they can talk their way into (or out of) anything!",
        celeb_examples: &["Kim Tae-hee", "Yoona (SNSD)", "Hyun Bin"],
    },
    AnimalFace {
        id: "bunny",
        name: "Bunny",
        name_ko: "토끼상",
        emoji: "🐰",
        traits: &["big eyes", "small lips", "cute nose", "youthful look"],
        description: "You have the sweet bunny face! Your big sparkly eyes and small features give you an eternally youthful and adorable appearance. People think you're younger than your actual age!",
        fun_fact: "Bunny-faced people often surprise others with their hidden determination and strength!",
        celeb_examples: &["IU", "Suzy", "Jungkook (BTS)"],
    },
    AnimalFace {
        id: "bear",
        name: "Bear",
        name_ko: "곰상",
        emoji: "🐻",
        traits: &["round face", "kind eyes", "warm smile", "gentle features"],
        description: "You have the warm bear face! Your round, friendly features make you look approachable and trustworthy. People feel safe and comfortable around you.",
        fun_fact: "Bear-faced people give the best hugs and are everyone's favorite person to confide in!",
        celeb_examples: &["Song Joong-ki", "Kim Go-eun", "Lee Kwang-soo"],
    },
    AnimalFace {
        id: "deer",
        name: "Deer",
        name_ko: "사슴상",
        emoji: "🦌",
        traits: &["big innocent eyes", "gentle look", "long face", "elegant neck"],
        description: "You have the graceful deer face! Your large, innocent eyes and elegant features give you a pure and refined appearance. You have a natural elegance that draws attention.",
        fun_fact: "Deer-faced people often become the center of attention without even trying!",
        celeb_examples: &["Taeyeon (SNSD)", "V (BTS)", "Shin Min-a"],
    },
    AnimalFace {
        id: "dinosaur",
        name: "Dinosaur",
        name_ko: "공룡상",
        emoji: "🦖",
        traits: &["strong jaw", "bold features", "powerful presence", "unique look"],
        description: "You have the powerful dinosaur face! Your strong, distinctive features give you a memorable and striking appearance. You stand out in any crowd!",
        fun_fact: "Dinosaur-faced people often become iconic - their unique looks are unforgettable!",
        celeb_examples: &["Gong Yoo", "Jun Ji-hyun", "Kim Woo-bin"],
    },
    AnimalFace {
        id: "hamster",
        name: "Hamster",
        name_ko: "햄스터상",
        emoji: "🐹",
        traits: &["chubby cheeks", "small features", "cute expression", "round face"],
        description: "You have the adorable hamster face! Your cute chubby cheeks and small features make you look irresistibly cute. People want to pinch your cheeks!",
        fun_fact: "Hamster-faced people are secretly foodies - they love snacks as much as their animal counterpart!",
        celeb_examples: &["Twice Sana", "NCT Jisung", "Red Velvet Seulgi"],
    },
    AnimalFace {
        id: "wolf",
        name: "Wolf",
        name_ko: "늑대상",
        emoji: "🐺",
        traits: &["intense eyes", "sharp jawline", "charismatic", "fierce look"],
        description: "You have the fierce wolf face! Your intense gaze and sharp features exude power and charisma. You're a natural leader who commands respect.",
        fun_fact: "Wolf-faced people often have a soft spot for their inner circle - fierce outside, gentle inside!",
        celeb_examples: &["EXO Kai", "BLACKPINK Lisa", "Park Seo-joon"],
    },
    AnimalFace {
        id: "penguin",
        name: "Penguin",
        name_ko: "펭귄상",
        emoji: "🐧",
        traits: &["round face", "cute waddle", "friendly vibe", "innocent look"],
        description: "You have the lovable penguin face! Your round, friendly features give you a uniquely charming appearance. You're the friend everyone loves to be around!",
        fun_fact: "Penguin-faced people are naturally funny - they make everyone laugh without trying!",
        celeb_examples: &["Park Bo-gum", "Kim Seon-ho", "Arin (Oh My Girl)"],
    },
];

pub fn all() -> &'static [AnimalFace] {
    &ANIMAL_FACES
}

/// Look up an animal by exact id.
pub fn find(id: &str) -> Result<&'static AnimalFace, CatalogError> {
    ANIMAL_FACES
        .iter()
        .find(|animal| animal.id == id)
        .ok_or_else(|| CatalogError::UnknownAnimal(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = all().iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn every_animal_has_enough_traits_for_fallback_copy() {
        for animal in all() {
            assert!(animal.traits.len() >= 3, "{} has too few traits", animal.id);
            assert!(!animal.celeb_examples.is_empty());
        }
    }

    #[test]
    fn find_is_exact_match() {
        assert_eq!(find("fox").unwrap().name, "Fox");
        assert_eq!(
            find("Fox"),
            Err(CatalogError::UnknownAnimal("Fox".to_string()))
        );
        assert!(find("none").is_err());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(find("cat").unwrap()).unwrap();
        assert_eq!(json["nameKo"], "고양이상");
        assert_eq!(json["celebExamples"][0], "Jennie (BLACKPINK)");
        assert_eq!(json["funFact"], ANIMAL_FACES[1].fun_fact);
    }
}
