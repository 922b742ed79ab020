//! Hit testing: point → layer / resize handle lookup.
//!
//! Walks the layer stack in reverse (last painted = topmost).

use tc_core::geometry::{Handle, PixelBox, to_pixels};
use tc_core::id::LayerId;
use tc_core::model::Composition;

/// Topmost visible layer whose box contains `(px, py)` in format pixels.
pub fn hit_test_layers(comp: &Composition, px: f32, py: f32) -> Option<LayerId> {
    let format = comp.format();
    comp.layers
        .iter()
        .rev()
        .filter(|l| l.visible)
        .find(|l| to_pixels(l.bounds, &format).contains(px, py))
        .map(|l| l.id)
}

/// Resize handle of `b` under `(px, py)`, checked in [`Handle::ALL`] order.
pub fn hit_test_handle(b: &PixelBox, px: f32, py: f32, handle_size: f32) -> Option<Handle> {
    Handle::ALL
        .into_iter()
        .find(|h| h.rect(b, handle_size).contains(px, py))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_core::geometry::NormalizedBox;
    use tc_core::model::Layer;

    fn comp() -> Composition {
        let mut comp = Composition::default();
        comp.layers.push(Layer::text(
            "back",
            "A",
            NormalizedBox::new(0.0, 0.0, 0.5, 0.5),
        ));
        comp.layers.push(Layer::image(
            "front",
            NormalizedBox::new(0.25, 0.25, 0.5, 0.5),
        ));
        comp
    }

    #[test]
    fn topmost_layer_wins() {
        let comp = comp();
        // (400, 250) is inside both boxes on a 1280×720 format.
        assert_eq!(hit_test_layers(&comp, 400.0, 250.0), Some(comp.layers[1].id));
        assert_eq!(hit_test_layers(&comp, 10.0, 10.0), Some(comp.layers[0].id));
        assert_eq!(hit_test_layers(&comp, 1270.0, 710.0), None);
    }

    #[test]
    fn hidden_layers_are_skipped() {
        let mut comp = comp();
        comp.layers[1].visible = false;
        assert_eq!(hit_test_layers(&comp, 400.0, 250.0), Some(comp.layers[0].id));
    }

    #[test]
    fn handles_are_found_at_corners_and_midpoints() {
        let b = PixelBox::new(100.0, 100.0, 200.0, 150.0);
        assert_eq!(hit_test_handle(&b, 100.0, 100.0, 10.0), Some(Handle::Nw));
        assert_eq!(hit_test_handle(&b, 99.0, 175.0, 10.0), Some(Handle::W));
        assert_eq!(hit_test_handle(&b, 304.0, 254.0, 10.0), Some(Handle::Se));
        assert_eq!(hit_test_handle(&b, 200.0, 175.0, 10.0), None);
    }
}
