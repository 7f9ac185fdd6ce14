//! # Response Composer
//!
//! File: cli/src/assistant/compose.rs
//!
//! ## Overview
//!
//! Renders the text for a classified turn. Composition is pure: all data
//! (food record, myth, swaps) is resolved by the caller and handed in as an
//! [`Answer`], so every template can be tested without files or network.
//!
//! Personalization rules:
//! - `"{name}, "` is prefixed only when a name is known and the turn count is
//!   above 2
//! - a closing question with the name is appended whenever a name is known
//! - rotating phrasings pick `variants[count % variants.len()]`, a fixed
//!   round-robin rather than a random choice
//!
use super::intent::Condition;
use super::records::{display_quantity, FoodRecord, MythRecord, SwapRecord};
use crate::core::config::Guidelines;
use std::fmt::Write;

/// Sodium per serving (mg) above which a warning is added.
pub const SODIUM_WARNING_MG: f64 = 600.0;
/// Sugar per serving (g) above which a warning is added.
pub const SUGAR_WARNING_G: f64 = 10.0;

/// Swaps listed under a condition answer.
pub const CONDITION_SWAP_LIMIT: usize = 3;
/// Swaps listed by the swap-list answer.
pub const SWAP_LIST_LIMIT: usize = 8;

const EXAMPLE_DISHES: &[&str] = &[
    "Chicken rice",
    "Nasi lemak",
    "Laksa",
    "Char kway teow",
    "Yong tau foo",
];

/// A classified turn together with the data its template needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    FirstGreeting,
    NameCaptured,
    ReturningGreeting,
    Myth(MythRecord),
    /// `None` when neither the local table nor the external lookup had the dish.
    Nutrition(Option<FoodRecord>),
    Condition {
        condition: Condition,
        swaps: Vec<SwapRecord>,
    },
    SwapList(Vec<SwapRecord>),
    Thanks,
    DefaultHelp,
}

/// Who we are talking to and how many turns they have had (this one included).
#[derive(Debug, Clone, Copy)]
pub struct Personalization<'a> {
    pub name: Option<&'a str>,
    pub count: u64,
}

impl Personalization<'_> {
    fn prefix(&self) -> String {
        match self.name {
            Some(name) if self.count > 2 => format!("{}, ", name),
            _ => String::new(),
        }
    }
}

/// Picks the phrasing for this turn.
pub fn rotate<T>(variants: &[T], count: u64) -> &T {
    &variants[(count % variants.len() as u64) as usize]
}

/// Static parts of one condition answer.
struct ConditionGuide {
    intro: &'static str,
    body: fn(&Guidelines) -> String,
    follow_up: &'static str,
}

static DIABETES_GUIDE: ConditionGuide = ConditionGuide {
    intro: "here are some diabetes management tips based on HPB guidelines:",
    body: diabetes_body,
    follow_up: "Need more specific advice",
};

fn diabetes_body(g: &Guidelines) -> String {
    format!(
        "TARGETS:\n\
         - Fasting glucose: {}\n\
         - Sugar limit: {}\n\
         - Daily fiber: {}\n\n\
         GOOD CHOICES:\n\
         - Fish soup, yong tau foo (more veggies), economic rice\n\n\
         AVOID:\n\
         - Sugary drinks, fried noodles, white rice in large portions\n",
        g.diabetes.fasting_glucose_normal, g.diabetes.sugar_limit, g.diabetes.fiber_recommendation
    )
}

static BLOOD_PRESSURE_GUIDE: ConditionGuide = ConditionGuide {
    intro: "here's how to manage blood pressure with food:",
    body: blood_pressure_body,
    follow_up: "Want more BP-friendly food tips",
};

fn blood_pressure_body(g: &Guidelines) -> String {
    format!(
        "TARGET: {}\n\
         SODIUM LIMIT: {}\n\n\
         TIPS:\n\
         - Ask for 'less salt' or 'no MSG' at hawker centers\n\
         - Avoid instant noodles and processed meats\n\
         - Choose steamed over fried options\n",
        g.blood_pressure.normal, g.blood_pressure.sodium_limit
    )
}

static CHOLESTEROL_GUIDE: ConditionGuide = ConditionGuide {
    intro: "let's talk about managing cholesterol:",
    body: cholesterol_body,
    follow_up: "Any other questions about cholesterol",
};

fn cholesterol_body(g: &Guidelines) -> String {
    format!(
        "LDL TARGET: {}\n\n\
         TIPS:\n\
         - Choose grilled/steamed over fried foods\n\
         - Use olive oil or canola oil for cooking\n\
         - Eat fatty fish (salmon, mackerel) 2x per week\n\
         - Limit coconut milk curries\n",
        g.cholesterol.ldl_target
    )
}

fn guide_for(condition: Condition) -> &'static ConditionGuide {
    match condition {
        Condition::Diabetes => &DIABETES_GUIDE,
        Condition::BloodPressure => &BLOOD_PRESSURE_GUIDE,
        Condition::Cholesterol => &CHOLESTEROL_GUIDE,
    }
}

/// Renders answers using the configured HPB guideline values.
#[derive(Debug, Clone)]
pub struct Composer {
    guidelines: Guidelines,
}

impl Composer {
    pub fn new(guidelines: Guidelines) -> Self {
        Self { guidelines }
    }

    pub fn compose(&self, answer: &Answer, who: Personalization<'_>) -> String {
        match answer {
            Answer::FirstGreeting => first_greeting(),
            Answer::NameCaptured => name_captured(who.name.unwrap_or_default()),
            Answer::ReturningGreeting => returning_greeting(who.name.unwrap_or("there"), who.count),
            Answer::Myth(myth) => myth_answer(myth, who),
            Answer::Nutrition(Some(food)) => self.nutrition_answer(food, who),
            Answer::Nutrition(None) => food_not_found(who),
            Answer::Condition { condition, swaps } => self.condition_answer(*condition, swaps, who),
            Answer::SwapList(swaps) => swap_list(swaps, who),
            Answer::Thanks => thanks(who),
            Answer::DefaultHelp => default_help(who),
        }
    }

    fn nutrition_answer(&self, food: &FoodRecord, who: Personalization<'_>) -> String {
        let mut out = format!(
            "{}here's the nutrition info for {}:\n\n",
            who.prefix(),
            food.name
        );
        let _ = writeln!(out, "Calories: {} kcal", display_quantity(food.calories));
        let _ = writeln!(out, "Protein: {}g", display_quantity(food.protein));
        let _ = writeln!(out, "Carbs: {}g", display_quantity(food.carbs));
        let _ = writeln!(out, "Fat: {}g", display_quantity(food.fat));
        let _ = writeln!(out, "Sodium: {}mg", display_quantity(food.sodium));
        let _ = writeln!(out, "Fiber: {}g", display_quantity(food.fiber));
        let _ = writeln!(out, "Sugar: {}g", display_quantity(food.sugar));

        // Fixed triggers; only the displayed limit comes from the guidelines.
        if food.sodium.is_some_and(|mg| mg > SODIUM_WARNING_MG) {
            let _ = write!(
                out,
                "\n\nWARNING: This is quite high in sodium! HPB recommends less than {}",
                self.guidelines.blood_pressure.sodium_limit
            );
        }
        if food.sugar.is_some_and(|g| g > SUGAR_WARNING_G) {
            out.push_str("\n\nWARNING: High sugar content - consume in moderation!");
        }
        if let Some(name) = who.name {
            let _ = write!(out, "\n\nWant to know about any other foods, {}?", name);
        }
        out
    }

    fn condition_answer(
        &self,
        condition: Condition,
        swaps: &[SwapRecord],
        who: Personalization<'_>,
    ) -> String {
        let guide = guide_for(condition);
        let mut out = format!("{}{}\n\n", who.prefix(), guide.intro);
        out.push_str(&(guide.body)(&self.guidelines));
        if !swaps.is_empty() {
            out.push_str("\n\nHEALTHY SWAPS:\n");
            for swap in swaps.iter().take(CONDITION_SWAP_LIMIT) {
                let _ = writeln!(out, "- {} → {}", swap.unhealthy, swap.healthy);
            }
        }
        if let Some(name) = who.name {
            let _ = write!(out, "\n\n{}, {}?", guide.follow_up, name);
        }
        out
    }
}

fn first_greeting() -> String {
    "Hello there! Welcome to Singapore Nutrition Assistant!\n\n\
     I'm here to help you with nutrition info about local Singaporean foods.\n\n\
     What's your name? I'd love to know who I'm chatting with!"
        .to_string()
}

fn name_captured(name: &str) -> String {
    format!(
        "Nice to meet you, {}!\n\n\
         I can help you with:\n\n\
         1. Nutrition info for local dishes (try: 'chicken rice nutrition')\n\
         2. Bust diet myths (try: 'are carbs bad?')\n\
         3. Health tips for diabetes, blood pressure, cholesterol\n\
         4. Healthy food swaps\n\n\
         What would you like to know?",
        name
    )
}

/// Greeting for a user we already know, rotating over four phrasings.
pub fn returning_greeting(name: &str, count: u64) -> String {
    let variants = [
        format!("Hey {}! Good to see you again!", name),
        format!("Welcome back, {}!", name),
        format!("Hi {}! Ready for some nutrition talk?", name),
        format!("Hello {}! What can I help you with today?", name),
    ];
    format!(
        "{}\n\nWhat would you like to know about today?",
        rotate(&variants, count)
    )
}

fn myth_answer(myth: &MythRecord, who: Personalization<'_>) -> String {
    let mut out = format!(
        "{}great question! Let me bust that myth for you:\n\n\
         MYTH: {}\n\n\
         TRUTH: {}\n\n\
         TIP: {}",
        who.prefix(),
        myth.myth,
        myth.truth,
        myth.tip
    );
    if let Some(name) = who.name {
        let _ = write!(out, "\n\nAnything else you'd like to know, {}?", name);
    }
    out
}

fn food_not_found(who: Personalization<'_>) -> String {
    let mut out = format!(
        "{}hmm, I couldn't find that food in my database.\n\n\
         Try asking about popular Singapore dishes like:",
        who.prefix()
    );
    for dish in EXAMPLE_DISHES {
        let _ = write!(out, "\n- {}", dish);
    }
    out
}

fn swap_list(swaps: &[SwapRecord], who: Personalization<'_>) -> String {
    let mut out = format!(
        "{}here are some healthy food swaps you can make:\n\n",
        who.prefix()
    );
    for (i, swap) in swaps.iter().take(SWAP_LIST_LIMIT).enumerate() {
        let _ = write!(
            out,
            "{}. {} → {}\n   Why? {}\n\n",
            i + 1,
            swap.unhealthy,
            swap.healthy,
            swap.benefit
        );
    }
    if let Some(name) = who.name {
        let _ = write!(out, "Try these out, {}! Your body will thank you.", name);
    }
    out
}

fn thanks(who: Personalization<'_>) -> String {
    let suffix = who.name.map(|n| format!(", {}", n)).unwrap_or_default();
    let variants = [
        format!("You're welcome{}! Happy to help!", suffix),
        format!("No problem{}! Eat healthy!", suffix),
        format!("Anytime{}! Stay healthy!", suffix),
    ];
    rotate(&variants, who.count).clone()
}

fn default_help(who: Personalization<'_>) -> String {
    let opener = match who.name {
        Some(name) => format!("Hey {}! ", name),
        None => "Hi there! ".to_string(),
    };
    format!(
        "{}I can help you with:\n\n\
         1. Nutrition info (try: 'nutrition for chicken rice')\n\
         2. Diet myths (try: 'are carbs bad?')\n\
         3. Health conditions (diabetes, blood pressure, cholesterol)\n\
         4. Healthy food swaps\n\n\
         What interests you?",
        opener
    )
}
