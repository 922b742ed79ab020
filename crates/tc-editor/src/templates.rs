//! Starter layouts.
//!
//! Each template replaces the layer stack wholesale (the background is
//! kept) and may switch the format. The first layer of every set is the
//! one selected afterwards.

use std::fmt;
use std::str::FromStr;
use tc_core::error::ComposerError;
use tc_core::geometry::NormalizedBox;
use tc_core::model::{Color, Layer, TextAlign, TextStyle};
use tc_core::FormatKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    YouTubeHook,
    YouTubeCenter,
    PinterestTitle,
    StoryPunchy,
}

impl Template {
    pub const ALL: [Template; 4] = [
        Template::YouTubeHook,
        Template::YouTubeCenter,
        Template::PinterestTitle,
        Template::StoryPunchy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::YouTubeHook => "youtube_hook",
            Self::YouTubeCenter => "youtube_center",
            Self::PinterestTitle => "pinterest_title",
            Self::StoryPunchy => "story_punchy",
        }
    }

    pub fn format(self) -> FormatKey {
        match self {
            Self::YouTubeHook | Self::YouTubeCenter => FormatKey::YouTube,
            Self::PinterestTitle => FormatKey::Pinterest,
            Self::StoryPunchy => FormatKey::Story,
        }
    }

    pub fn layers(self) -> Vec<Layer> {
        match self {
            Self::YouTubeHook => {
                let hook = text_layer(
                    "Hook",
                    "3 MISTAKES\nYOU MUST AVOID",
                    NormalizedBox::new(0.06, 0.14, 0.62, 0.40),
                    |s| {
                        set_font(s, "Bebas Neue", 900, 130.0);
                        s.stroke.on = true;
                        s.stroke.width = 16.0;
                        s.shadow.on = true;
                    },
                );
                let badge = text_layer(
                    "Badge",
                    "WATCH",
                    NormalizedBox::new(0.72, 0.12, 0.24, 0.18),
                    |s| {
                        s.font.family = "Anton".into();
                        s.auto_fit = true;
                        s.stroke.on = false;
                        set_pill(s, "#ff2d2d", 0.88, 26.0);
                    },
                );
                vec![hook, badge]
            }
            Self::YouTubeCenter => vec![text_layer(
                "Center Hook",
                "THIS CHANGES\nEVERYTHING",
                NormalizedBox::new(0.10, 0.22, 0.80, 0.42),
                |s| {
                    s.font.family = "Anton".into();
                    s.font.size = 160.0;
                    s.stroke.on = true;
                    s.stroke.width = 18.0;
                    s.shadow.on = true;
                    s.align = TextAlign::Center;
                },
            )],
            Self::PinterestTitle => {
                let title = text_layer(
                    "Title",
                    "SOCIAL MEDIA\nCONTENT IDEAS",
                    NormalizedBox::new(0.07, 0.08, 0.86, 0.22),
                    |s| {
                        set_font(s, "Montserrat", 900, 110.0);
                        s.stroke.on = true;
                        s.stroke.width = 12.0;
                        s.shadow.on = true;
                    },
                );
                let bullets = text_layer(
                    "Bullets",
                    "\u{2022} 30-day plan\n\u{2022} Hooks + CTAs\n\u{2022} Templates included",
                    NormalizedBox::new(0.10, 0.34, 0.80, 0.30),
                    |s| {
                        set_font(s, "Inter", 800, 66.0);
                        s.stroke.on = true;
                        s.stroke.width = 10.0;
                        s.align = TextAlign::Left;
                        s.uppercase = false;
                        set_pill(s, "#000000", 0.35, 26.0);
                    },
                );
                let footer = text_layer(
                    "Footer",
                    "Read more at: yoursite.com",
                    NormalizedBox::new(0.10, 0.86, 0.80, 0.10),
                    |s| {
                        set_font(s, "Inter", 700, 40.0);
                        s.stroke.on = false;
                        s.shadow.on = false;
                        set_pill(s, "#000000", 0.45, 22.0);
                        s.uppercase = false;
                    },
                );
                vec![title, bullets, footer]
            }
            Self::StoryPunchy => {
                let top = text_layer(
                    "Title",
                    "ONE TRICK\nTO BOOST VIEWS",
                    NormalizedBox::new(0.08, 0.12, 0.84, 0.26),
                    |s| {
                        s.font.family = "Anton".into();
                        s.font.size = 140.0;
                        s.stroke.on = true;
                        s.stroke.width = 14.0;
                    },
                );
                let badge = text_layer(
                    "Badge",
                    "SAVE THIS",
                    NormalizedBox::new(0.24, 0.72, 0.52, 0.12),
                    |s| {
                        set_font(s, "Montserrat", 900, 72.0);
                        s.stroke.on = false;
                        set_pill(s, "#5aa7ff", 0.85, 28.0);
                    },
                );
                vec![top, badge]
            }
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Template {
    type Err = ComposerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ComposerError::UnknownTemplate(s.to_string()))
    }
}

/// The layers of a fresh project: a hook headline plus a red "NEW" badge.
pub fn default_project() -> Vec<Layer> {
    let hook = Layer::text(
        "Hook",
        "STOP DOING THIS",
        NormalizedBox::new(0.07, 0.12, 0.62, 0.32),
    );
    let badge = text_layer(
        "Badge",
        "NEW",
        NormalizedBox::new(0.73, 0.10, 0.22, 0.16),
        |s| {
            s.font.family = "Anton".into();
            s.font.size = 90.0;
            s.auto_fit = true;
            s.fill = Color::WHITE;
            s.stroke.on = false;
            s.shadow.on = true;
            set_pill(s, "#ff0000", 0.85, 28.0);
            s.pill.padding = 14.0;
        },
    );
    vec![hook, badge]
}

fn text_layer(
    name: &str,
    content: &str,
    bounds: NormalizedBox,
    style: impl FnOnce(&mut TextStyle),
) -> Layer {
    let mut layer = Layer::text(name, content, bounds);
    if let Some(text) = layer.as_text_mut() {
        style(&mut text.style);
    }
    layer
}

fn set_font(s: &mut TextStyle, family: &str, weight: u16, size: f32) {
    s.font.family = family.into();
    s.font.weight = weight;
    s.font.size = size;
}

fn set_pill(s: &mut TextStyle, hex: &str, opacity: f32, radius: f32) {
    s.pill.on = true;
    s.pill.color = Color::from_hex(hex).unwrap_or(Color::BLACK);
    s.pill.opacity = opacity;
    s.pill.radius = radius;
}
