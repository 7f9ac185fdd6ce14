//! # Intent Classifier
//!
//! File: cli/src/assistant/intent.rs
//!
//! ## Overview
//!
//! Picks exactly one [`Intent`] per message. The decision is an ordered list of
//! named rules ([`CASCADE`]); the first rule that fires wins and the order is
//! part of the behavior. Moving the myth rule below the nutrition rule, for
//! example, would change the answer to "do carbs have too many calories".
//!
//! All keyword tests are case-insensitive substring tests on the raw message.
//!
use super::records::{MythRecord, SwapCategory};
use super::session::UserSession;

const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "yo",
    "sup",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
];

/// Words that disqualify a short message from being taken as a name.
const NAME_STOPWORDS: &[&str] = &[
    "nutrition",
    "calories",
    "healthy",
    "food",
    "eat",
    "diet",
    "diabetes",
    "pressure",
    "cholesterol",
];

const NUTRITION_KEYWORDS: &[&str] = &[
    "nutrition",
    "calories",
    "healthy",
    "info",
    "nutrient",
    "nutritional",
    "how many",
];
const DIABETES_KEYWORDS: &[&str] = &["diabetes"];
const BLOOD_PRESSURE_KEYWORDS: &[&str] = &["blood pressure", "hypertension", "bp"];
const CHOLESTEROL_KEYWORDS: &[&str] = &["cholesterol"];
const SWAP_KEYWORDS: &[&str] = &["swap", "alternative", "replace"];
const THANKS_KEYWORDS: &[&str] = &["thank", "thanks"];

const MAX_NAME_WORDS: usize = 3;

/// Health conditions with their own guidance answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Diabetes,
    BloodPressure,
    Cholesterol,
}

impl Condition {
    pub fn swap_category(self) -> SwapCategory {
        match self {
            Condition::Diabetes => SwapCategory::Diabetes,
            Condition::BloodPressure => SwapCategory::BloodPressure,
            Condition::Cholesterol => SwapCategory::Cholesterol,
        }
    }
}

/// The response category selected for a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    NameCapture,
    FirstGreeting,
    ReturningGreeting,
    Myth(MythRecord),
    NutritionQuery,
    Condition(Condition),
    SwapList,
    Thanks,
    DefaultHelp,
}

/// Coarse shape of a message, computed before the cascade runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageShape {
    /// A bare greeting such as "hi" or "good morning there".
    Greeting,
    /// Short, with no nutrition words: could be someone's name.
    PossibleName,
    Other,
}

pub fn message_shape(message: &str) -> MessageShape {
    let msg = message.trim().to_lowercase();
    let is_greeting = GREETINGS.iter().any(|g| {
        msg == *g || (msg.starts_with(g) && msg[g.len()..].starts_with(' '))
    });
    if is_greeting {
        return MessageShape::Greeting;
    }
    if msg.split_whitespace().count() <= MAX_NAME_WORDS && !contains_any(&msg, NAME_STOPWORDS) {
        return MessageShape::PossibleName;
    }
    MessageShape::Other
}

fn contains_any(haystack_lower: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack_lower.contains(n))
}

/// Everything a rule may look at.
pub struct Probe<'a> {
    lower: String,
    shape: MessageShape,
    session: &'a UserSession,
    myths: &'a [MythRecord],
}

impl<'a> Probe<'a> {
    pub fn new(message: &str, session: &'a UserSession, myths: &'a [MythRecord]) -> Self {
        Self {
            lower: message.to_lowercase(),
            shape: message_shape(message),
            session,
            myths,
        }
    }

    fn mentions(&self, keywords: &[&str]) -> bool {
        contains_any(&self.lower, keywords)
    }
}

type Rule = fn(&Probe<'_>) -> Option<Intent>;

fn name_capture(p: &Probe<'_>) -> Option<Intent> {
    (p.session.awaiting_name && p.shape == MessageShape::PossibleName).then_some(Intent::NameCapture)
}

fn first_greeting(p: &Probe<'_>) -> Option<Intent> {
    (p.shape == MessageShape::Greeting && p.session.known_name().is_none())
        .then_some(Intent::FirstGreeting)
}

fn returning_greeting(p: &Probe<'_>) -> Option<Intent> {
    (p.shape == MessageShape::Greeting && p.session.known_name().is_some())
        .then_some(Intent::ReturningGreeting)
}

fn myth(p: &Probe<'_>) -> Option<Intent> {
    p.myths
        .iter()
        .find(|m| m.matches(&p.lower))
        .map(|m| Intent::Myth(m.clone()))
}

fn nutrition_query(p: &Probe<'_>) -> Option<Intent> {
    p.mentions(NUTRITION_KEYWORDS).then_some(Intent::NutritionQuery)
}

fn diabetes(p: &Probe<'_>) -> Option<Intent> {
    p.mentions(DIABETES_KEYWORDS)
        .then_some(Intent::Condition(Condition::Diabetes))
}

fn blood_pressure(p: &Probe<'_>) -> Option<Intent> {
    p.mentions(BLOOD_PRESSURE_KEYWORDS)
        .then_some(Intent::Condition(Condition::BloodPressure))
}

fn cholesterol(p: &Probe<'_>) -> Option<Intent> {
    p.mentions(CHOLESTEROL_KEYWORDS)
        .then_some(Intent::Condition(Condition::Cholesterol))
}

fn swap_list(p: &Probe<'_>) -> Option<Intent> {
    p.mentions(SWAP_KEYWORDS).then_some(Intent::SwapList)
}

fn thanks(p: &Probe<'_>) -> Option<Intent> {
    p.mentions(THANKS_KEYWORDS).then_some(Intent::Thanks)
}

/// The classification rules, in evaluation order.
pub const CASCADE: &[(&str, Rule)] = &[
    ("name-capture", name_capture),
    ("first-greeting", first_greeting),
    ("returning-greeting", returning_greeting),
    ("myth", myth),
    ("nutrition-query", nutrition_query),
    ("diabetes", diabetes),
    ("blood-pressure", blood_pressure),
    ("cholesterol", cholesterol),
    ("swap-list", swap_list),
    ("thanks", thanks),
];

/// Runs the cascade; falls back to [`Intent::DefaultHelp`].
pub fn classify(probe: &Probe<'_>) -> Intent {
    CASCADE
        .iter()
        .find_map(|(_, rule)| rule(probe))
        .unwrap_or(Intent::DefaultHelp)
}
