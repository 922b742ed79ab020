//! Smart hook suggestions.
//!
//! Turns a free-form video/post title into short, punchy hook phrases, each
//! paired with a thumbnail style preset. Pure functions only; applying a
//! suggestion goes through the editor's normal mutation path.

use crate::format::FormatKey;
use crate::geometry::NormalizedBox;
use crate::model::{Color, TextAlign, TextStyle};
use serde::{Deserialize, Serialize};

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "to", "of", "for", "in", "on", "with", "your", "you", "is",
    "are", "this", "that", "it", "from", "at", "by", "as", "how", "what", "why", "when", "best",
    "top",
];

/// Number of suggestions produced per title.
pub const MAX_HOOKS: usize = 10;

/// Keywords pulled out of a title, most significant first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords {
    /// Title with punctuation stripped and whitespace collapsed.
    pub clean: String,
    pub k1: String,
    pub k2: String,
    pub k3: String,
    /// All unique keywords in title order.
    pub unique: Vec<String>,
}

/// Extract significant words: punctuation other than `$ % - _` is dropped,
/// words of two characters or fewer and stop words are skipped, and
/// duplicates are removed case-insensitively (first spelling wins).
pub fn extract_keywords(title: &str) -> Keywords {
    let stripped: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '$' | '%' | '-')
            {
                c
            } else {
                ' '
            }
        })
        .collect();
    let words: Vec<&str> = stripped.split_whitespace().collect();
    let clean = words.join(" ");

    let mut unique: Vec<String> = Vec::new();
    for word in words {
        let low = word.to_lowercase();
        if low.chars().count() <= 2 || STOP_WORDS.contains(&low.as_str()) {
            continue;
        }
        if !unique.iter().any(|u| u.to_lowercase() == low) {
            unique.push(word.to_string());
        }
    }

    let pick = |i: usize, fallback: &str| {
        unique
            .get(i)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    };
    Keywords {
        clean,
        k1: pick(0, "THIS"),
        k2: pick(1, "TRICK"),
        k3: pick(2, "TODAY"),
        unique,
    }
}

/// Named thumbnail text looks that can be applied to any text layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StylePreset {
    BoldOutline,
    BluePill,
    DarkGlass,
    CleanMinimal,
    RedAlert,
}

impl StylePreset {
    pub const ALL: [StylePreset; 5] = [
        StylePreset::BoldOutline,
        StylePreset::BluePill,
        StylePreset::DarkGlass,
        StylePreset::CleanMinimal,
        StylePreset::RedAlert,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::BoldOutline => "Bold Outline",
            Self::BluePill => "Blue Pill",
            Self::DarkGlass => "Dark Glass",
            Self::CleanMinimal => "Clean Minimal",
            Self::RedAlert => "Red Alert",
        }
    }

    /// Overwrite the look of `style`; content and box are untouched.
    pub fn apply(self, style: &mut TextStyle) {
        style.fill = Color::WHITE;
        style.uppercase = true;
        style.auto_fit = true;
        style.align = TextAlign::Center;
        style.line_height = 1.0;
        style.font.weight = 900;
        style.shadow.on = true;

        match self {
            Self::BoldOutline => {
                style.font.family = "Anton".into();
                set_stroke(style, Some(18.0));
                set_shadow(style, 18.0, 6.0);
                style.pill.on = false;
            }
            Self::BluePill => {
                style.font.family = "Montserrat".into();
                set_stroke(style, None);
                set_shadow(style, 14.0, 4.0);
                set_pill(style, "#5aa7ff", 0.88, 32.0, 18.0);
            }
            Self::DarkGlass => {
                style.font.family = "Inter".into();
                set_stroke(style, Some(10.0));
                set_shadow(style, 16.0, 5.0);
                set_pill(style, "#000000", 0.35, 26.0, 16.0);
                style.align = TextAlign::Left;
                style.line_height = 1.05;
            }
            Self::CleanMinimal => {
                style.font.family = "Oswald".into();
                style.font.weight = 700;
                set_stroke(style, None);
                set_shadow(style, 12.0, 3.0);
                style.pill.on = false;
            }
            Self::RedAlert => {
                style.font.family = "Bebas Neue".into();
                set_stroke(style, Some(16.0));
                set_shadow(style, 18.0, 6.0);
                set_pill(style, "#ff2d2d", 0.72, 22.0, 14.0);
            }
        }
    }
}

fn set_stroke(style: &mut TextStyle, width: Option<f32>) {
    match width {
        Some(w) => {
            style.stroke.on = true;
            style.stroke.color = Color::BLACK;
            style.stroke.width = w;
        }
        None => style.stroke.on = false,
    }
}

fn set_shadow(style: &mut TextStyle, blur: f32, offset: f32) {
    style.shadow.blur = blur;
    style.shadow.offset_x = offset;
    style.shadow.offset_y = offset;
}

fn set_pill(style: &mut TextStyle, hex: &str, opacity: f32, radius: f32, padding: f32) {
    style.pill.on = true;
    style.pill.color = Color::from_hex(hex).unwrap_or(Color::BLACK);
    style.pill.opacity = opacity;
    style.pill.radius = radius;
    style.pill.padding = padding;
}

/// One generated hook phrase with its suggested look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookSuggestion {
    pub text: String,
    pub preset: StylePreset,
    pub subtitle: String,
}

/// Generate up to [`MAX_HOOKS`] hook phrases for `title`, in a stable order.
pub fn generate_hooks(title: &str) -> Vec<HookSuggestion> {
    let k = extract_keywords(title);
    let (k1, k2) = (k.k1.as_str(), k.k2.as_str());
    let phrases = [
        format!("STOP {k1}"),
        format!("{k1} CHANGES EVERYTHING"),
        format!("DO THIS FOR {k1}"),
        format!("I WAS WRONG ABOUT {k1}"),
        format!("{k1} IN 5 MINUTES"),
        format!("THE {k1} TRICK NOBODY TELLS YOU"),
        format!("3 {k1} MISTAKES"),
        format!("DON\u{2019}T BUY {k1} BEFORE THIS"),
        format!("{k1}: WHAT NO ONE SAYS"),
        format!("THE FASTEST WAY TO {k1}"),
        format!("THIS FIXED MY {k1}"),
        format!("{k1} VS {k2}"),
        format!("THE REAL COST OF {k1}"),
        format!("MAKE {k1} LOOK EASY"),
    ];
    let subtitle = format!("Uses keyword: {k1} \u{2022} alt: {k2}");

    let mut picks: Vec<HookSuggestion> = Vec::with_capacity(MAX_HOOKS);
    for (i, text) in phrases.into_iter().enumerate() {
        if picks.len() >= MAX_HOOKS {
            break;
        }
        if picks.iter().any(|p| p.text == text) {
            continue;
        }
        picks.push(HookSuggestion {
            text,
            preset: StylePreset::ALL[i % StylePreset::ALL.len()],
            subtitle: subtitle.clone(),
        });
    }
    picks
}

/// Where an applied hook lands for a given format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookPlacement {
    pub bounds: NormalizedBox,
    pub align: Option<TextAlign>,
    pub line_height: Option<f32>,
}

pub fn hook_placement(format: FormatKey) -> HookPlacement {
    match format {
        FormatKey::Pinterest => HookPlacement {
            bounds: NormalizedBox::new(0.08, 0.08, 0.84, 0.22),
            align: Some(TextAlign::Center),
            line_height: Some(1.0),
        },
        FormatKey::Story => HookPlacement {
            bounds: NormalizedBox::new(0.08, 0.12, 0.84, 0.24),
            align: None,
            line_height: None,
        },
        FormatKey::YouTube => HookPlacement {
            bounds: NormalizedBox::new(0.06, 0.14, 0.62, 0.38),
            align: Some(TextAlign::Left),
            line_height: None,
        },
    }
}
