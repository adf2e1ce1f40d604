//! Persona - Built-in buyer personas
//!
//! Each persona carries the system instruction that replaces the default
//! buyer persona when selected.

use serde::Serialize;

use crate::domain::value_objects::Difficulty;

/// A selectable buyer persona
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub id: &'static str,
    pub name: &'static str,
    pub difficulty: Difficulty,
    pub description: &'static str,
    pub prompt: &'static str,
}

const CATALOG: &[Persona] = &[
    Persona {
        id: "detail_analyst",
        name: "Detail-Oriented Analyst",
        difficulty: Difficulty::Hard,
        description: "Methodical, needs all information, makes spreadsheets",
        prompt: "You are a meticulous buyer who wants every detail before deciding. \
                 Ask specific technical questions, request data/proof, be methodical and \
                 slow to commit. Sound professional but skeptical.",
    },
    Persona {
        id: "emotional_first_timer",
        name: "Emotional First-Time Buyer",
        difficulty: Difficulty::Easy,
        description: "Nervous, excited, easily overwhelmed, needs reassurance",
        prompt: "You are a first-time buyer who is excited but nervous and unsure. \
                 Ask for reassurance, get a bit overwhelmed by too much info, need simple \
                 explanations. Show enthusiasm mixed with hesitation.",
    },
    Persona {
        id: "experienced_negotiator",
        name: "Experienced Negotiator",
        difficulty: Difficulty::Expert,
        description: "Master tactician, uses silence and pressure, knows all the tricks",
        prompt: "You are a seasoned buyer who has seen every sales trick. Push back hard \
                 on pricing, use silence strategically, challenge every claim, negotiate \
                 aggressively. Be calm but tough.",
    },
    Persona {
        id: "budget_conscious",
        name: "Budget-Conscious Buyer",
        difficulty: Difficulty::Medium,
        description: "Price-sensitive, always comparing alternatives, needs value proof",
        prompt: "You are price-sensitive and always looking for the best deal. Constantly \
                 mention competitors, ask about discounts, question the value proposition. \
                 Be friendly but firm about budget constraints.",
    },
    Persona {
        id: "decision_maker_rush",
        name: "Rushed Decision Maker",
        difficulty: Difficulty::Medium,
        description: "Busy, wants quick answers, no time for details, impatient",
        prompt: "You are extremely busy and have no time for long pitches. Interrupt if \
                 the seller takes too long, ask for the bottom line immediately, make quick \
                 snap judgments. Be impatient and direct.",
    },
    Persona {
        id: "skeptical_researcher",
        name: "Skeptical Researcher",
        difficulty: Difficulty::Hard,
        description: "Questions everything, fact-checks, sees through fluff",
        prompt: "You are highly skeptical and research everything. Challenge claims with \
                 counterexamples, ask for proof/references, call out vague statements. \
                 Be polite but relentlessly questioning.",
    },
];

impl Persona {
    /// All built-in personas, in display order
    pub fn catalog() -> &'static [Persona] {
        CATALOG
    }

    /// Look up a built-in persona by id
    pub fn find(id: &str) -> Option<&'static Persona> {
        let id = id.trim();
        CATALOG.iter().find(|p| p.id == id)
    }

    /// Personas of a single difficulty
    pub fn by_difficulty(difficulty: Difficulty) -> impl Iterator<Item = &'static Persona> {
        CATALOG.iter().filter(move |p| p.difficulty == difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let ids: HashSet<_> = Persona::catalog().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), Persona::catalog().len());
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_find_known_and_unknown() {
        let persona = Persona::find("budget_conscious").unwrap();
        assert_eq!(persona.difficulty, Difficulty::Medium);
        assert!(persona.prompt.contains("best deal"));

        assert!(Persona::find(" experienced_negotiator ").is_some());
        assert!(Persona::find("time_traveller").is_none());
    }

    #[test]
    fn test_by_difficulty() {
        let hard: Vec<_> = Persona::by_difficulty(Difficulty::Hard)
            .map(|p| p.id)
            .collect();
        assert_eq!(hard, vec!["detail_analyst", "skeptical_researcher"]);
    }
}
