// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lexicon-based politeness detection.
//!
//! Decides whether a message is pure social noise (greetings, thanks,
//! farewells) with nothing substantive to act on. Zero-cost, no LLM.

/// Greeting phrases.
const GREETINGS: &[&str] = &[
    "hello", "hi", "hey", "hi there", "hello there", "greetings",
    "good morning", "good afternoon", "good evening", "good day",
    "howdy", "what's up", "sup", "hiya", "morning", "afternoon",
    "evening", "good to see you", "nice to see you", "pleasure to see you",
    "welcome", "yo", "hola", "how are you", "how are you doing",
    "how's it going", "how do you do", "how have you been",
    "how's everything", "how's your day", "how's your day going",
    "how are things", "how's life", "what's new", "what's happening",
];

/// Thank-you expressions.
const THANKS: &[&str] = &[
    "thank you", "thanks", "thank you very much", "thanks a lot",
    "thanks so much", "thank you so much", "many thanks",
    "thanks a million", "thank you kindly", "much appreciated",
    "i appreciate it", "appreciate it", "grateful", "i am grateful",
    "thankful", "cheers", "ta", "merci", "gracias", "danke",
    "appreciate your help", "thank you for your help",
    "thanks for your assistance", "thank you for your time",
    "thanks for your time", "thank you for your support",
];

/// Farewell phrases.
const FAREWELLS: &[&str] = &[
    "goodbye", "bye", "see you", "see you later", "farewell",
    "take care", "have a good day", "have a nice day", "have a great day",
    "have a good one", "catch you later", "talk to you later",
    "until next time", "later", "so long", "cheers", "adios",
    "ciao", "auf wiedersehen", "have a good evening", "have a good night",
    "good night", "have a good weekend", "have a nice weekend",
    "see you soon", "see you tomorrow", "bye for now", "signing off",
    "i'll be going now", "i have to go", "gotta go", "ttyl",
];

/// Apology phrases.
const APOLOGIES: &[&str] = &[
    "sorry", "i apologize", "my apologies", "forgive me",
    "i'm sorry", "pardon me", "excuse me", "regret",
    "i regret", "apologies for", "sorry for", "sorry about",
    "i apologize for", "please forgive", "i beg your pardon",
    "i didn't mean to", "it was my fault", "my bad", "oops",
    "my mistake", "i made a mistake", "i was wrong",
];

/// Polite request phrases.
const POLITE_REQUESTS: &[&str] = &[
    "please", "kindly", "if you don't mind", "if you could",
    "would you", "could you", "would you mind", "could you please",
    "would you please", "may i", "might i", "if possible",
    "if it's not too much trouble", "when you have a moment",
    "at your convenience", "when you get a chance",
];

/// General courtesies.
const COURTESIES: &[&str] = &[
    "nice to meet you", "pleased to meet you", "pleasure to meet you",
    "it's a pleasure", "delighted", "honored", "with pleasure",
    "happy to help", "glad to help", "no problem", "no worries",
    "my pleasure", "don't mention it", "you're welcome",
    "welcome", "not at all", "it's nothing", "anytime",
    "glad to be of assistance", "glad to be of service",
];

/// Stop words that never count as substantive on their own.
const FILLER_WORDS: &[&str] = &[
    "a", "the", "and", "or", "but", "so", "very", "much",
    "my", "i", "me", "to", "you", "your", "for", "just",
    "am", "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "do", "does", "did", "will", "would",
    "shall", "should", "may", "might", "must", "can", "could",
    "of", "in", "on", "at", "by", "with", "about", "against",
    "from", "into", "during", "before", "after", "above", "below",
    "this", "that", "these", "those", "it", "its", "they", "them",
];

/// Result of the politeness check. Both flags are consumed downstream:
/// only `is_only_politeness` gates rejection, `contains_politeness` is
/// informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolitenessCheck {
    /// The message carries nothing beyond politeness and filler.
    pub is_only_politeness: bool,
    /// At least one politeness phrase appears in the message.
    pub contains_politeness: bool,
}

fn lexicons() -> impl Iterator<Item = &'static str> {
    GREETINGS
        .iter()
        .chain(THANKS)
        .chain(FAREWELLS)
        .chain(APOLOGIES)
        .chain(POLITE_REQUESTS)
        .chain(COURTESIES)
        .copied()
}

/// Classify a message's politeness content.
///
/// Normalizes (lowercase, strip `.,!?;:`, whitespace-split), then checks
/// the six lexicons by substring. A message with no politeness phrase at
/// all short-circuits to `{false, false}` -- this path never rejects
/// non-polite content, including the empty string.
pub fn check_politeness(message: &str) -> PolitenessCheck {
    let lower = message.to_lowercase();
    let clean: String = lower
        .trim()
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '!' | '?' | ';' | ':'))
        .collect();
    let words: Vec<&str> = clean.split_whitespace().collect();

    let contains_politeness = lexicons().any(|expr| clean.contains(expr));
    if !contains_politeness {
        return PolitenessCheck {
            is_only_politeness: false,
            contains_politeness: false,
        };
    }

    let substantive = words.iter().filter(|word| {
        if word.len() < 2 {
            return false;
        }
        if FILLER_WORDS.contains(word) {
            return false;
        }
        // A token that is itself part of a politeness phrase does not count.
        let in_politeness = lexicons().any(|expr| expr.contains(*word));
        !in_politeness
    });

    PolitenessCheck {
        is_only_politeness: substantive.count() == 0,
        contains_politeness: true,
    }
}
