//! Input abstraction layer.
//!
//! Pointer events arrive already mapped into format pixels; the host is
//! responsible for the client → format conversion
//! ([`tc_core::client_to_format`]).

/// Keyboard modifier state sampled with a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false };

    pub const SHIFT: Modifiers = Modifiers { shift: true };
}

/// A normalized pointer event from mouse, touch or pen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown {
        x: f32,
        y: f32,
        modifiers: Modifiers,
    },
    PointerMove {
        x: f32,
        y: f32,
        modifiers: Modifiers,
    },
    PointerUp {
        x: f32,
        y: f32,
    },
}
