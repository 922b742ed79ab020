//! WASM bridge for Thumbcraft: exposes the composer engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the DOM (file
//! inputs, property panel, download links); everything that touches the
//! composition goes through [`ComposerCanvas`].

mod canvas2d;

pub use canvas2d::Canvas2dSurface;

use std::collections::HashMap;
use tc_core::error::{ComposerError, Result};
use tc_core::geometry::client_to_format;
use tc_core::hooks::HookSuggestion;
use tc_core::id::LayerId;
use tc_core::{EngineConfig, FormatKey};
use tc_editor::{
    ComposerStore, DecodeTarget, DecodeTicket, ImageEdit, InputEvent, Modifiers, Mutation,
    SelectTool, Template, TextEdit, parse_background_fit,
};
use tc_render::{ExportFormat, RenderOptions, export_filename, render};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing composer controller.
///
/// Holds the store, the pointer tool and the display surface.
#[wasm_bindgen]
pub struct ComposerCanvas {
    store: ComposerStore,
    tool: SelectTool,
    surface: Canvas2dSurface,
    loads: LoadHandles,
    /// Suggestions from the last `generate_hooks` call, applied by index.
    hooks: Vec<HookSuggestion>,
}

#[wasm_bindgen]
impl ComposerCanvas {
    /// Create a controller drawing into `ctx`, starting with the default
    /// project.
    #[wasm_bindgen(constructor)]
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        console_error_panic_hook_setup();
        Self {
            store: ComposerStore::default(),
            tool: SelectTool::new(),
            surface: Canvas2dSurface::new(ctx),
            loads: LoadHandles::default(),
            hooks: Vec::new(),
        }
    }

    /// Override engine constants from JSON; missing fields keep defaults.
    pub fn set_config(&mut self, json: &str) -> bool {
        match serde_json::from_str::<EngineConfig>(json) {
            Ok(config) => {
                self.store.set_config(config);
                true
            }
            Err(e) => {
                log::warn!("invalid engine config: {e}");
                false
            }
        }
    }

    /// Redraw the whole composition. The backing canvas is sized to the
    /// format times the device scale.
    pub fn render(&mut self) {
        let comp = self.store.composition();
        let (w, h) = comp.format().pixel_size();
        let scale = comp.device_scale;
        self.surface
            .resize((w as f32 * scale) as u32, (h as f32 * scale) as u32);
        render(
            &mut self.surface,
            comp,
            self.store.config(),
            RenderOptions::default(),
        );

        let live: Vec<_> = comp
            .background
            .iter()
            .chain(comp.layers.iter().filter_map(|l| l.as_image()?.raster.as_ref()))
            .map(|r| r.id())
            .collect();
        self.surface.prune_rasters(&live);
    }

    /// Store revision; changes whenever a redraw is needed.
    pub fn revision(&self) -> f64 {
        self.store.revision() as f64
    }

    pub fn status(&self) -> String {
        self.store.status().to_string()
    }

    /// Supersampling multiplier for the display and for exports.
    pub fn set_device_scale(&mut self, scale: f32) -> bool {
        self.store.apply(Mutation::SetDeviceScale(scale))
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Pointer down at client coordinates relative to the canvas element,
    /// which is displayed at `display_w`×`display_h` CSS pixels.
    pub fn handle_pointer_down(
        &mut self,
        x: f32,
        y: f32,
        display_w: f32,
        display_h: f32,
        shift: bool,
    ) -> bool {
        let (x, y) = self.to_format(x, y, display_w, display_h);
        let event = InputEvent::PointerDown {
            x,
            y,
            modifiers: modifiers(shift),
        };
        self.store.handle_input(&mut self.tool, &event)
    }

    pub fn handle_pointer_move(
        &mut self,
        x: f32,
        y: f32,
        display_w: f32,
        display_h: f32,
        shift: bool,
    ) -> bool {
        let (x, y) = self.to_format(x, y, display_w, display_h);
        let event = InputEvent::PointerMove {
            x,
            y,
            modifiers: modifiers(shift),
        };
        self.store.handle_input(&mut self.tool, &event)
    }

    pub fn handle_pointer_up(&mut self, x: f32, y: f32, display_w: f32, display_h: f32) -> bool {
        let (x, y) = self.to_format(x, y, display_w, display_h);
        self.store
            .handle_input(&mut self.tool, &InputEvent::PointerUp { x, y })
    }

    /// Whether a move/resize gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.tool.dragging().is_some()
    }

    // ─── Layers ──────────────────────────────────────────────────────────

    pub fn add_text_layer(&mut self) -> bool {
        self.store.apply(Mutation::AddTextLayer)
    }

    pub fn add_image_layer(&mut self) -> bool {
        self.store.apply(Mutation::AddImageLayer)
    }

    /// Select a layer by id; an empty id clears the selection.
    pub fn select_layer(&mut self, layer_id: &str) -> bool {
        if layer_id.is_empty() {
            return self.store.apply(Mutation::Select(None));
        }
        self.with_layer(layer_id, |id| Mutation::Select(Some(id)))
    }

    pub fn get_selected_id(&self) -> String {
        self.store
            .selected_id()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn delete_selected(&mut self) -> bool {
        self.with_selected(|id| Mutation::Remove { id })
    }

    pub fn duplicate_selected(&mut self) -> bool {
        self.with_selected(|id| Mutation::Duplicate { id })
    }

    pub fn bring_forward(&mut self) -> bool {
        self.with_selected(|id| Mutation::BringForward { id })
    }

    pub fn send_backward(&mut self) -> bool {
        self.with_selected(|id| Mutation::SendBackward { id })
    }

    pub fn snap_to_safe_area(&mut self) -> bool {
        self.with_selected(|id| Mutation::SnapToSafeArea { id })
    }

    pub fn toggle_visible(&mut self, layer_id: &str) -> bool {
        self.with_layer(layer_id, |id| Mutation::ToggleVisible { id })
    }

    pub fn rename_layer(&mut self, layer_id: &str, name: &str) -> bool {
        let name = name.to_string();
        self.with_layer(layer_id, move |id| Mutation::Rename { id, name })
    }

    /// Layer stack as JSON, bottom first.
    pub fn get_layers_json(&self) -> String {
        serde_json::to_string(&self.store.composition().layers).unwrap_or_else(|_| "[]".to_string())
    }

    /// The selected layer as JSON, or `null`.
    pub fn get_selected_layer_json(&self) -> String {
        serde_json::to_string(&self.store.composition().selected_layer())
            .unwrap_or_else(|_| "null".to_string())
    }

    // ─── Properties ──────────────────────────────────────────────────────

    /// Apply a text property edit to the selected layer, e.g.
    /// `("stroke_width", "18")`. Returns `{"ok":bool,"error"?:string}`.
    pub fn set_text_prop(&mut self, field: &str, value: &str) -> String {
        let result = TextEdit::parse(field, value).map(|edit| {
            self.with_selected(|id| Mutation::EditText { id, edit })
        });
        result_json(result)
    }

    pub fn set_image_prop(&mut self, field: &str, value: &str) -> String {
        let result = ImageEdit::parse(field, value).map(|edit| {
            self.with_selected(|id| Mutation::EditImage { id, edit })
        });
        result_json(result)
    }

    pub fn set_format(&mut self, key: &str) -> bool {
        match key.parse::<FormatKey>() {
            Ok(key) => self.store.apply(Mutation::SetFormat(key)),
            Err(e) => self.reject(e),
        }
    }

    pub fn set_background_fit(&mut self, value: &str) -> bool {
        match parse_background_fit(value) {
            Ok(fit) => self.store.apply(Mutation::SetBackgroundFit(fit)),
            Err(e) => self.reject(e),
        }
    }

    pub fn set_dim(&mut self, dim: f32) -> bool {
        self.store.apply(Mutation::SetDim(dim))
    }

    pub fn clear_background(&mut self) -> bool {
        self.store.apply(Mutation::ClearBackground)
    }

    /// Recolor the selected text layer against the background.
    pub fn auto_contrast(&mut self) -> bool {
        let (w, h) = self.store.composition().format().pixel_size();
        match Canvas2dSurface::offscreen(w, h) {
            Ok(mut scratch) => self.store.apply_auto_contrast(&mut scratch),
            Err(e) => {
                log::warn!("auto-contrast scratch canvas unavailable: {e:?}");
                false
            }
        }
    }

    // ─── Images ──────────────────────────────────────────────────────────

    /// Start a background load. Pass the returned handle to `finish_load`.
    pub fn begin_background_load(&mut self) -> u32 {
        let ticket = self.store.begin_decode(DecodeTarget::Background);
        self.loads.track(ticket)
    }

    /// Start a load into the selected image layer; 0 when none is selected.
    pub fn begin_layer_load(&mut self) -> u32 {
        let Some(layer) = self
            .store
            .composition()
            .selected_layer()
            .filter(|l| l.as_image().is_some())
        else {
            self.store.set_status("Select an Image/Logo layer first");
            return 0;
        };
        let ticket = self.store.begin_decode(DecodeTarget::Layer(layer.id));
        self.loads.track(ticket)
    }

    /// Decode `bytes` and land them under a handle from `begin_*_load`.
    pub fn finish_load(&mut self, handle: u32, bytes: &[u8], source: &str) -> bool {
        match self.loads.take(handle) {
            Some(ticket) => self.store.load_raster(ticket, bytes, source),
            None => false,
        }
    }

    // ─── Templates & hooks ───────────────────────────────────────────────

    pub fn apply_template(&mut self, key: &str) -> bool {
        match key.parse::<Template>() {
            Ok(t) => self.store.apply(Mutation::ApplyTemplate(t)),
            Err(e) => self.reject(e),
        }
    }

    pub fn new_project(&mut self) -> bool {
        self.loads.clear();
        self.store.apply(Mutation::NewProject)
    }

    /// Hook suggestions for `title` as a JSON array.
    pub fn generate_hooks(&mut self, title: &str) -> String {
        self.hooks = self.store.generate_hooks(title);
        serde_json::to_string(&self.hooks).unwrap_or_else(|_| "[]".to_string())
    }

    /// Apply suggestion `index` from the last `generate_hooks` call.
    pub fn apply_hook(&mut self, index: usize) -> bool {
        match self.hooks.get(index).cloned() {
            Some(hook) => self.store.apply(Mutation::ApplyHook(hook)),
            None => false,
        }
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Render without overlays at format × device scale and encode as
    /// `"png"` or `"jpeg"` (`quality` 0–1). Returns `undefined` on failure.
    pub fn export_image(&mut self, kind: &str, quality: f32) -> Option<Vec<u8>> {
        let export = match self.export_format(kind, quality) {
            Ok(export) => export,
            Err(e) => {
                self.reject(e);
                return None;
            }
        };
        let comp = self.store.composition();
        let (w, h) = comp.format().pixel_size();
        let scale = comp.device_scale;
        let mut out = match Canvas2dSurface::offscreen(
            (w as f32 * scale) as u32,
            (h as f32 * scale) as u32,
        ) {
            Ok(surface) => surface,
            Err(e) => {
                log::warn!("export canvas unavailable: {e:?}");
                return None;
            }
        };
        render(
            &mut out,
            comp,
            self.store.config(),
            RenderOptions { overlays: false },
        );
        match tc_render::Surface::encode(&out, export) {
            Ok(bytes) => {
                self.store.set_status(match export {
                    ExportFormat::Png => "Exported PNG",
                    ExportFormat::Jpeg { .. } => "Exported JPEG",
                });
                Some(bytes)
            }
            Err(e) => {
                log::warn!("export failed: {e}");
                self.store.set_status("Export failed");
                None
            }
        }
    }

    /// MIME type for an export of `kind`, for the download `Blob`.
    pub fn export_mime(&self, kind: &str) -> String {
        self.export_format(kind, 1.0)
            .unwrap_or(ExportFormat::Png)
            .mime()
            .to_string()
    }

    /// Download name for an export of `kind`, stamped with the current time.
    pub fn export_filename(&self, kind: &str) -> String {
        let export = self
            .export_format(kind, 1.0)
            .unwrap_or(ExportFormat::Png);
        let ts: String = js_sys::Date::new_0().to_iso_string().into();
        export_filename(&self.store.composition().format(), export, &ts)
    }
}

impl ComposerCanvas {
    fn to_format(&self, x: f32, y: f32, display_w: f32, display_h: f32) -> (f32, f32) {
        client_to_format(x, y, display_w, display_h, &self.store.composition().format())
    }

    fn layer_id(&self, layer_id: &str) -> Result<LayerId> {
        self.store
            .composition()
            .layers
            .iter()
            .map(|l| l.id)
            .find(|id| id.as_str() == layer_id)
            .ok_or_else(|| ComposerError::UnknownLayer(layer_id.to_string()))
    }

    fn with_layer(&mut self, layer_id: &str, f: impl FnOnce(LayerId) -> Mutation) -> bool {
        match self.layer_id(layer_id) {
            Ok(id) => self.store.apply(f(id)),
            Err(e) => self.reject(e),
        }
    }

    fn with_selected(&mut self, f: impl FnOnce(LayerId) -> Mutation) -> bool {
        match self.store.selected_id() {
            Some(id) => self.store.apply(f(id)),
            None => false,
        }
    }

    fn export_format(&self, kind: &str, quality: f32) -> Result<ExportFormat> {
        match kind {
            "png" => Ok(ExportFormat::Png),
            "jpeg" | "jpg" => Ok(ExportFormat::jpeg(quality, self.store.config())),
            other => Err(ComposerError::InvalidValue {
                field: "export".to_string(),
                value: other.to_string(),
            }),
        }
    }

    fn reject(&self, err: ComposerError) -> bool {
        log::warn!("{err}");
        false
    }
}

/// Decode tickets handed to JS as plain integers. Handle 0 is never issued.
///
/// At most one handle is kept per target; starting a load drops the previous
/// handle for that target.
#[derive(Debug)]
struct LoadHandles {
    tickets: HashMap<u32, DecodeTicket>,
    next: u32,
}

impl Default for LoadHandles {
    fn default() -> Self {
        Self {
            tickets: HashMap::new(),
            next: 1,
        }
    }
}

impl LoadHandles {
    fn track(&mut self, ticket: DecodeTicket) -> u32 {
        self.tickets.retain(|_, t| t.target != ticket.target);
        let handle = self.next;
        self.next = self.next.wrapping_add(1).max(1);
        self.tickets.insert(handle, ticket);
        handle
    }

    fn take(&mut self, handle: u32) -> Option<DecodeTicket> {
        self.tickets.remove(&handle)
    }

    fn clear(&mut self) {
        self.tickets.clear();
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.tickets.len()
    }
}

fn modifiers(shift: bool) -> Modifiers {
    if shift { Modifiers::SHIFT } else { Modifiers::NONE }
}

fn result_json(result: Result<bool>) -> String {
    match result {
        Ok(changed) => serde_json::json!({ "ok": true, "changed": changed }).to_string(),
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }).to_string(),
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Thumbcraft WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn result_json_reports_errors() {
        assert_eq!(result_json(Ok(true)), r#"{"changed":true,"ok":true}"#);
        let err = result_json(Err(ComposerError::UnknownProperty("kerning".into())));
        assert!(err.starts_with(r#"{"error":"#));
        assert!(err.contains(r#""ok":false"#));
    }

    #[test]
    fn newer_load_replaces_handle_for_same_target() {
        let mut store = ComposerStore::default();
        let mut loads = LoadHandles::default();
        let layer = store.composition().layers[0].id;

        let abandoned = loads.track(store.begin_decode(DecodeTarget::Background));
        let other = loads.track(store.begin_decode(DecodeTarget::Layer(layer)));
        let current = loads.track(store.begin_decode(DecodeTarget::Background));
        assert_eq!(loads.len(), 2);
        assert_eq!(loads.take(abandoned), None);
        assert!(loads.take(current).is_some());
        assert!(loads.take(other).is_some());
        assert_eq!(loads.len(), 0);
    }

    #[test]
    fn shift_maps_to_modifiers() {
        assert!(modifiers(true).shift);
        assert_eq!(modifiers(false), Modifiers::NONE);
    }
}
