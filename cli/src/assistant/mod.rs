//! # NutriBot Assistant Core
//!
//! File: cli/src/assistant/mod.rs
//!
//! ## Overview
//!
//! The conversational core shared by the console, the one-shot `ask` command
//! and the HTTP server. One call to [`Assistant::respond`] is one turn:
//!
//! 1. lock the user's session (turns for the same user run one at a time)
//! 2. count the turn
//! 3. classify the message (`intent`)
//! 4. fetch whatever the intent needs: food record, swaps (`resolver`, `store`)
//! 5. render the answer (`compose`)
//! 6. store the updated session (`session`)
//!
//! A turn always produces text. Missing data files, malformed records and
//! external lookup failures all degrade to a normal answer.
//!
//! ## Architecture
//!
//! - `records`: food, myth and swap record types
//! - `store`: JSON-lines loading of the three collections
//! - `nutrients`: provider nutrient name → record field rules
//! - `usda`: the `NutritionLookup` trait and its USDA implementation
//! - `resolver`: local-first food resolution with external fallback
//! - `intent`: ordered classification cascade
//! - `compose`: answer templates
//! - `session`: per-user state and turn locking
//!
//! ## Examples
//!
//! ```ignore
//! let config = config::load_config(None)?;
//! let assistant = Assistant::from_config(&config)?;
//! let reply = assistant.respond("chicken rice nutrition", "web_user").await;
//! println!("{}", reply);
//! ```
//!
pub mod compose;
pub mod intent;
pub mod nutrients;
pub mod records;
pub mod resolver;
pub mod session;
pub mod store;
pub mod usda;

use crate::core::config::{Config, Guidelines};
use crate::core::error::Result;
use compose::{Answer, Composer, Personalization, CONDITION_SWAP_LIMIT, SWAP_LIST_LIMIT};
use intent::{classify, Intent, Probe};
use resolver::FoodResolver;
use session::SessionLedger;
use std::sync::Arc;
use store::LexicalStore;
use tracing::debug;
use usda::{NutritionLookup, UsdaClient};

/// The nutrition assistant: classification, data lookup, composition and sessions.
pub struct Assistant {
    store: LexicalStore,
    resolver: FoodResolver,
    composer: Composer,
    ledger: SessionLedger,
}

impl Assistant {
    pub fn new(
        store: LexicalStore,
        external: Arc<dyn NutritionLookup>,
        guidelines: Guidelines,
        ledger: SessionLedger,
    ) -> Self {
        Self {
            resolver: FoodResolver::new(store.clone(), external),
            store,
            composer: Composer::new(guidelines),
            ledger,
        }
    }

    /// Builds an assistant backed by the configured files, the USDA API and
    /// in-memory sessions.
    pub fn from_config(config: &Config) -> Result<Self> {
        let usda = UsdaClient::new(&config.api)?;
        Ok(Self::new(
            LexicalStore::from_config(&config.files),
            Arc::new(usda),
            config.hpb_guidelines.clone(),
            SessionLedger::in_memory(),
        ))
    }

    pub fn store(&self) -> &LexicalStore {
        &self.store
    }

    /// Runs one turn for `user_id` and returns the reply.
    ///
    /// `message` is expected to be non-empty; callers validate input first.
    pub async fn respond(&self, message: &str, user_id: &str) -> String {
        let _turn = self.ledger.lock_user(user_id).await;
        let mut session = self.ledger.get_or_create(user_id);
        let count = session.advance_turn();

        let myths = self.store.load_myths();
        let intent = classify(&Probe::new(message, &session, &myths));
        debug!(user_id, count, ?intent, "Classified message");

        let answer = match intent {
            Intent::NameCapture => {
                session.set_name(message);
                Answer::NameCaptured
            }
            Intent::FirstGreeting => {
                session.awaiting_name = true;
                Answer::FirstGreeting
            }
            Intent::ReturningGreeting => Answer::ReturningGreeting,
            Intent::Myth(myth) => Answer::Myth(myth),
            Intent::NutritionQuery => Answer::Nutrition(self.resolver.resolve(message).await),
            Intent::Condition(condition) => Answer::Condition {
                condition,
                swaps: self
                    .store
                    .get_swaps(Some(condition.swap_category()), Some(CONDITION_SWAP_LIMIT)),
            },
            Intent::SwapList => Answer::SwapList(self.store.get_swaps(None, Some(SWAP_LIST_LIMIT))),
            Intent::Thanks => Answer::Thanks,
            Intent::DefaultHelp => Answer::DefaultHelp,
        };

        let reply = self.composer.compose(
            &answer,
            Personalization {
                name: session.known_name(),
                count,
            },
        );
        self.ledger.save(session);
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::records::{FoodRecord, FoodSource};
    use crate::assistant::resolver::tests::StubLookup;
    use crate::assistant::store::tests::store_with;
    use std::sync::atomic::Ordering;
    use tempfile::TempDir;

    const FOODS: &[&str] = &[
        r#"{"name": "chicken rice", "calories": 607, "protein": 25, "carbs": 78, "fat": 20, "sodium": 900}"#,
        r#"{"name": "yong tau foo", "calories": 380, "sodium": 500}"#,
    ];
    const MYTHS: &[&str] = &[
        r#"{"keywords": ["carbs bad", "carbohydrates bad"], "myth": "All carbs are bad", "truth": "Complex carbs from whole grains are actually good for you", "tip": "Choose brown rice over white rice"}"#,
    ];
    const SWAPS: &[&str] = &[
        r#"{"category": "diabetes", "unhealthy": "Teh", "healthy": "Teh-C kosong", "benefit": "No condensed milk"}"#,
        r#"{"category": "blood_pressure", "unhealthy": "Instant noodles", "healthy": "Sliced fish soup", "benefit": "Far less sodium"}"#,
    ];

    fn assistant_with(lookup: Arc<StubLookup>) -> (TempDir, Assistant) {
        let (dir, store) = store_with(FOODS, MYTHS, SWAPS);
        let assistant = Assistant::new(
            store,
            lookup,
            Guidelines::default(),
            SessionLedger::in_memory(),
        );
        (dir, assistant)
    }

    #[tokio::test]
    async fn test_name_capture_round_trip() {
        let (_dir, bot) = assistant_with(StubLookup::returning(None));

        let first = bot.respond("hello", "u1").await;
        assert!(first.contains("What's your name?"));

        let captured = bot.respond("alice tan", "u1").await;
        assert!(captured.starts_with("Nice to meet you, Alice Tan!"));

        // Third turn: count 3 selects the fourth phrasing.
        let back = bot.respond("hi", "u1").await;
        assert!(back.starts_with("Hello Alice Tan! What can I help you with today?"));

        // Another user is still a stranger.
        let other = bot.respond("hi", "u2").await;
        assert!(other.contains("What's your name?"));
    }

    #[tokio::test]
    async fn test_short_message_not_taken_as_name_unless_asked() {
        let (_dir, bot) = assistant_with(StubLookup::returning(None));
        let reply = bot.respond("bob", "u1").await;
        assert!(reply.starts_with("Hi there! I can help you with"));
    }

    #[tokio::test]
    async fn test_myth_checked_before_nutrition() {
        let stub = StubLookup::returning(None);
        let (_dir, bot) = assistant_with(stub.clone());
        let reply = bot
            .respond("are carbs bad? how many calories in rice", "u1")
            .await;
        assert!(reply.contains("MYTH: All carbs are bad"));
        assert!(reply.contains("TRUTH: Complex carbs from whole grains are actually good for you"));
        assert!(reply.contains("TIP: Choose brown rice over white rice"));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_local_food_answer_without_external_call() {
        let stub = StubLookup::returning(None);
        let (_dir, bot) = assistant_with(stub.clone());

        let reply = bot.respond("chicken rice nutrition", "u1").await;
        assert!(reply.starts_with("here's the nutrition info for chicken rice:"));
        assert!(reply.contains("Sodium: 900mg"));
        assert!(reply.contains("Sugar: N/Ag"));
        assert!(reply.contains("WARNING: This is quite high in sodium!"));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);

        let lighter = bot.respond("yong tau foo calories", "u1").await;
        assert!(!lighter.contains("WARNING"));
    }

    #[tokio::test]
    async fn test_unknown_food_uses_external_then_not_found() {
        let external = FoodRecord {
            name: "Durian, raw".into(),
            calories: Some(147.0),
            sugar: Some(27.0),
            source: FoodSource::External,
            ..FoodRecord::default()
        };
        let (_dir, bot) = assistant_with(StubLookup::returning(Some(external)));
        let reply = bot.respond("durian nutrition", "u1").await;
        assert!(reply.contains("here's the nutrition info for Durian, raw:"));
        assert!(reply.contains("WARNING: High sugar content"));

        let (_dir, bot) = assistant_with(StubLookup::failing());
        let reply = bot.respond("nonexistent dish xyz nutrition", "u1").await;
        assert!(reply.starts_with("hmm, I couldn't find that food in my database."));
        assert!(reply.contains("- Char kway teow"));
    }

    #[tokio::test]
    async fn test_condition_answer_lists_category_swaps() {
        let (_dir, bot) = assistant_with(StubLookup::returning(None));
        let reply = bot.respond("how to manage diabetes", "u1").await;
        assert!(reply.contains("HEALTHY SWAPS:\n- Teh → Teh-C kosong\n"));
        assert!(!reply.contains("Instant noodles"));
    }

    #[tokio::test]
    async fn test_swap_list_and_personal_prefix() {
        let (_dir, bot) = assistant_with(StubLookup::returning(None));
        bot.respond("hey", "u1").await;
        bot.respond("Wei", "u1").await;
        let reply = bot.respond("any healthier alternative to my lunch?", "u1").await;
        assert!(reply.starts_with("Wei, here are some healthy food swaps you can make:"));
        assert!(reply.contains("2. Instant noodles → Sliced fish soup\n   Why? Far less sodium"));
        assert!(reply.ends_with("Try these out, Wei! Your body will thank you."));
    }

    #[tokio::test]
    async fn test_thanks_rotates_with_turn_count() {
        let (_dir, bot) = assistant_with(StubLookup::returning(None));
        assert_eq!(bot.respond("thanks!", "u1").await, "No problem! Eat healthy!");
        assert_eq!(bot.respond("thank you", "u1").await, "Anytime! Stay healthy!");
        assert_eq!(bot.respond("thanks", "u1").await, "You're welcome! Happy to help!");
    }
}
