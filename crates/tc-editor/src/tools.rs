//! Pointer tools.
//!
//! A tool turns input events into [`Mutation`]s for the store. It sees the
//! composition read-only and keeps its own gesture state between events.
//!
//! ## Select tool gestures
//!
//! | Gesture | Effect |
//! |---------|--------|
//! | Press outside the selection | Select the topmost visible layer under the pointer |
//! | Press on a handle | Resize from that handle |
//! | Press inside the box | Move |
//! | **Shift** while moving | Lock to the dominant axis |

use crate::input::InputEvent;
use crate::store::Mutation;
use smallvec::{SmallVec, smallvec};
use tc_core::geometry::{Handle, PixelBox, clamp, to_normalized, to_pixels};
use tc_core::id::LayerId;
use tc_core::model::Composition;
use tc_core::EngineConfig;
use tc_render::{hit_test_handle, hit_test_layers};

pub type Mutations = SmallVec<[Mutation; 2]>;

pub trait Tool {
    /// Handle an input event, returning zero or more mutations.
    fn handle(
        &mut self,
        event: &InputEvent,
        comp: &Composition,
        config: &EngineConfig,
    ) -> Mutations;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragMode {
    Move,
    Resize(Handle),
}

/// An in-progress gesture. Deltas are always taken from the press point
/// against the box as it was at press time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub layer: LayerId,
    pub mode: DragMode,
    start_x: f32,
    start_y: f32,
    start_box: PixelBox,
}

#[derive(Debug, Default)]
pub struct SelectTool {
    drag: Option<Drag>,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragging(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    fn press(&mut self, x: f32, y: f32, comp: &Composition, config: &EngineConfig) -> Mutations {
        let format = comp.format();
        let mut out = Mutations::new();
        let mut selected = comp.selected_layer();

        let inside_selection = selected
            .map(|l| to_pixels(l.bounds, &format).contains(x, y))
            .unwrap_or(false);
        if !inside_selection
            && let Some(hit) = hit_test_layers(comp, x, y)
        {
            selected = comp.layer(hit);
            out.push(Mutation::Select(Some(hit)));
        }

        let Some(layer) = selected else {
            return out;
        };
        let b = to_pixels(layer.bounds, &format);
        let mode = match hit_test_handle(&b, x, y, config.handle_size) {
            Some(handle) => DragMode::Resize(handle),
            None if b.contains(x, y) => DragMode::Move,
            None => return out,
        };
        log::debug!("drag {:?} on {}", mode, layer.id);
        self.drag = Some(Drag {
            layer: layer.id,
            mode,
            start_x: x,
            start_y: y,
            start_box: b,
        });
        out
    }

    fn drag_to(
        drag: &Drag,
        (x, y): (f32, f32),
        shift: bool,
        comp: &Composition,
        config: &EngineConfig,
    ) -> Mutations {
        if comp.layer(drag.layer).is_none() {
            return Mutations::new();
        }
        let format = comp.format();
        let (w, h) = (format.width, format.height);
        let (dx, dy) = (x - drag.start_x, y - drag.start_y);

        let b = match drag.mode {
            DragMode::Move => move_box(drag.start_box, dx, dy, shift, w, h),
            DragMode::Resize(handle) => {
                resize_box(drag.start_box, handle, dx, dy, w, h, config.min_box_size)
            }
        };
        smallvec![Mutation::SetBox {
            id: drag.layer,
            bounds: to_normalized(b, &format),
        }]
    }
}

impl Tool for SelectTool {
    fn handle(
        &mut self,
        event: &InputEvent,
        comp: &Composition,
        config: &EngineConfig,
    ) -> Mutations {
        match *event {
            InputEvent::PointerDown { x, y, .. } => {
                self.drag = None;
                self.press(x, y, comp, config)
            }
            InputEvent::PointerMove { x, y, modifiers } => match self.drag {
                Some(drag) => Self::drag_to(&drag, (x, y), modifiers.shift, comp, config),
                None => Mutations::new(),
            },
            InputEvent::PointerUp { .. } => {
                self.drag = None;
                Mutations::new()
            }
        }
    }
}

/// Translate `b`, keeping it fully inside a `w`×`h` canvas. With `shift`
/// only the larger of the two deltas applies.
pub fn move_box(mut b: PixelBox, dx: f32, dy: f32, shift: bool, w: f32, h: f32) -> PixelBox {
    let (mut dx, mut dy) = (dx, dy);
    if shift {
        if dx.abs() > dy.abs() {
            dy = 0.0;
        } else {
            dx = 0.0;
        }
    }
    b.x = clamp(b.x + dx, 0.0, w - b.w);
    b.y = clamp(b.y + dy, 0.0, h - b.h);
    b
}

/// Drag the edges `handle` controls by (`dx`, `dy`). The opposite edges stay
/// put, and the box never shrinks below `min` or leaves the canvas.
pub fn resize_box(
    mut b: PixelBox,
    handle: Handle,
    dx: f32,
    dy: f32,
    w: f32,
    h: f32,
    min: f32,
) -> PixelBox {
    let edges = handle.edges();
    if edges.left {
        let nx = clamp(b.x + dx, 0.0, b.x + b.w - min);
        b.w = b.x + b.w - nx;
        b.x = nx;
    }
    if edges.right {
        b.w = clamp(b.w + dx, min, w - b.x);
    }
    if edges.top {
        let ny = clamp(b.y + dy, 0.0, b.y + b.h - min);
        b.h = b.y + b.h - ny;
        b.y = ny;
    }
    if edges.bottom {
        b.h = clamp(b.h + dy, min, h - b.y);
    }

    b.x = clamp(b.x, 0.0, w - min);
    b.y = clamp(b.y, 0.0, h - min);
    b.w = clamp(b.w, min, w - b.x);
    b.h = clamp(b.h, min, h - b.y);
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn west_handle_keeps_right_edge() {
        let b = resize_box(
            PixelBox::new(100.0, 100.0, 200.0, 150.0),
            Handle::W,
            -40.0,
            0.0,
            1280.0,
            720.0,
            30.0,
        );
        assert_eq!(b, PixelBox::new(60.0, 100.0, 240.0, 150.0));
    }

    #[test]
    fn north_handle_stops_at_min_height() {
        let b = resize_box(
            PixelBox::new(100.0, 100.0, 200.0, 150.0),
            Handle::N,
            0.0,
            500.0,
            1280.0,
            720.0,
            30.0,
        );
        assert_eq!(b, PixelBox::new(100.0, 220.0, 200.0, 30.0));
    }

    #[test]
    fn move_stays_on_canvas() {
        let start = PixelBox::new(1000.0, 600.0, 200.0, 100.0);
        let b = move_box(start, 500.0, 500.0, false, 1280.0, 720.0);
        assert_eq!(b, PixelBox::new(1080.0, 620.0, 200.0, 100.0));
    }

    #[test]
    fn shift_locks_dominant_axis() {
        let start = PixelBox::new(100.0, 100.0, 50.0, 50.0);
        let b = move_box(start, 40.0, -10.0, true, 1280.0, 720.0);
        assert_eq!(b, PixelBox::new(140.0, 100.0, 50.0, 50.0));
        let b = move_box(start, 10.0, 10.0, true, 1280.0, 720.0);
        assert_eq!(b.x, 100.0);
        assert_eq!(b.y, 110.0);
    }
}
