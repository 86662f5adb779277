use crate::ui::rgb;
use rand::prelude::*;
use std::sync::LazyLock;

/// A waiting message paired with its display color
#[derive(Clone)]
pub struct ColoredMessage {
    pub text: String,
    pub color: (u8, u8, u8),
}

static WAITING_MESSAGES: LazyLock<Vec<ColoredMessage>> = LazyLock::new(|| {
    vec![
        ColoredMessage {
            text: "🪶 Rewriting your copy in plain words...".to_string(),
            color: rgb::ELECTRIC_PURPLE,
        },
        ColoredMessage {
            text: "✂️ Trimming the marketing fluff...".to_string(),
            color: rgb::NEON_CYAN,
        },
        ColoredMessage {
            text: "📦 Unboxing a simpler description...".to_string(),
            color: rgb::CORAL,
        },
        ColoredMessage {
            text: "🔍 Hunting for plainer phrasing...".to_string(),
            color: rgb::ELECTRIC_YELLOW,
        },
        ColoredMessage {
            text: "🧵 Reweaving the product prose...".to_string(),
            color: rgb::SUCCESS_GREEN,
        },
        ColoredMessage {
            text: "💬 Asking Gemini for the simple version...".to_string(),
            color: rgb::NEON_CYAN,
        },
        ColoredMessage {
            text: "📝 Drafting a cleaner pitch...".to_string(),
            color: rgb::ELECTRIC_PURPLE,
        },
        ColoredMessage {
            text: "🛒 Making the shelf copy shopper-friendly...".to_string(),
            color: rgb::CORAL,
        },
    ]
});

/// Pick a random waiting message for the spinner
pub fn get_waiting_message() -> ColoredMessage {
    let mut rng = rand::rng();
    WAITING_MESSAGES
        .choose(&mut rng)
        .cloned()
        .unwrap_or_else(|| ColoredMessage {
            text: "Rewriting...".to_string(),
            color: rgb::NEON_CYAN,
        })
}
