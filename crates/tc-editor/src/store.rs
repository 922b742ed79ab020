//! The composition store: single source of truth for the editor.
//!
//! All changes go through [`ComposerStore::apply`]. A change that actually
//! alters the composition bumps [`ComposerStore::revision`], which hosts use
//! as the redraw signal. Mutations aimed at a missing layer, or at a layer
//! of the wrong kind, are silent no-ops.
//!
//! Raster decoding is the one asynchronous boundary. Each target (the
//! background, or one image layer) hands out increasing tickets, and only
//! the most recently issued ticket for a target may land its result.

use crate::edits::{ImageEdit, TextEdit};
use crate::input::InputEvent;
use crate::templates::{Template, default_project};
use crate::tools::Tool;
use std::collections::HashMap;
use tc_core::error::Result;
use tc_core::geometry::{NormalizedBox, clamp};
use tc_core::hooks::{self, HookSuggestion, hook_placement};
use tc_core::id::LayerId;
use tc_core::model::{BackgroundFit, Color, Composition, Layer};
use tc_core::raster::{RasterHandle, decode_raster};
use tc_core::{EngineConfig, FormatKey};
use tc_render::Surface;

const TEXT_LAYER_BOX: NormalizedBox = NormalizedBox::new(0.12, 0.45, 0.76, 0.20);
const IMAGE_LAYER_BOX: NormalizedBox = NormalizedBox::new(0.78, 0.78, 0.18, 0.18);
const HOOK_LAYER_BOX: NormalizedBox = NormalizedBox::new(0.07, 0.12, 0.70, 0.34);

/// A change to the composition.
#[derive(Debug, Clone)]
pub enum Mutation {
    Select(Option<LayerId>),
    /// Reposition a layer. Produced by the drag/resize tool.
    SetBox {
        id: LayerId,
        bounds: NormalizedBox,
    },
    AddTextLayer,
    AddImageLayer,
    Remove {
        id: LayerId,
    },
    Duplicate {
        id: LayerId,
    },
    BringForward {
        id: LayerId,
    },
    SendBackward {
        id: LayerId,
    },
    ToggleVisible {
        id: LayerId,
    },
    Rename {
        id: LayerId,
        name: String,
    },
    EditText {
        id: LayerId,
        edit: TextEdit,
    },
    EditImage {
        id: LayerId,
        edit: ImageEdit,
    },
    /// Keep a text layer inside the format's safe area.
    SnapToSafeArea {
        id: LayerId,
    },
    SetTextColors {
        id: LayerId,
        fill: Color,
        stroke: Color,
    },
    SetFormat(FormatKey),
    SetBackgroundFit(BackgroundFit),
    SetDim(f32),
    /// Supersampling multiplier; non-positive values are ignored.
    SetDeviceScale(f32),
    ClearBackground,
    ApplyTemplate(Template),
    NewProject,
    ApplyHook(HookSuggestion),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeTarget {
    Background,
    Layer(LayerId),
}

/// Proof that a decode was started; hand it back with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeTicket {
    pub target: DecodeTarget,
    generation: u64,
}

pub struct ComposerStore {
    composition: Composition,
    config: EngineConfig,
    revision: u64,
    status: String,
    /// Latest ticket generation issued per decode target.
    decodes: HashMap<DecodeTarget, u64>,
    next_generation: u64,
}

impl Default for ComposerStore {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ComposerStore {
    /// A store holding the default project.
    pub fn new(config: EngineConfig) -> Self {
        let mut store = Self {
            composition: Composition::default(),
            config,
            revision: 0,
            status: String::new(),
            decodes: HashMap::new(),
            next_generation: 1,
        };
        store.apply(Mutation::NewProject);
        store
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
        self.revision += 1;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Last user-facing status message.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
    }

    pub fn selected_id(&self) -> Option<LayerId> {
        self.composition.selected
    }

    /// Apply one mutation. Returns whether the composition changed.
    pub fn apply(&mut self, mutation: Mutation) -> bool {
        log::debug!("apply {mutation:?}");
        let changed = self.apply_inner(mutation);
        if changed {
            self.revision += 1;
        }
        changed
    }

    pub fn apply_all(&mut self, mutations: impl IntoIterator<Item = Mutation>) -> bool {
        let mut changed = false;
        for m in mutations {
            changed |= self.apply(m);
        }
        changed
    }

    /// Route a pointer event through `tool` and apply what it produces.
    pub fn handle_input(&mut self, tool: &mut impl Tool, event: &InputEvent) -> bool {
        let mutations = tool.handle(event, &self.composition, &self.config);
        self.apply_all(mutations)
    }

    fn apply_inner(&mut self, mutation: Mutation) -> bool {
        let comp = &mut self.composition;
        match mutation {
            Mutation::Select(id) => {
                if let Some(id) = id
                    && comp.layer(id).is_none()
                {
                    return false;
                }
                comp.selected = id;
                true
            }
            Mutation::SetBox { id, bounds } => match comp.layer_mut(id) {
                Some(layer) => {
                    layer.bounds = bounds;
                    true
                }
                None => false,
            },
            Mutation::AddTextLayer => {
                let mut layer = Layer::text(
                    &format!("Text {}", comp.layers.len() + 1),
                    "TYPE HERE",
                    TEXT_LAYER_BOX,
                );
                if let Some(text) = layer.as_text_mut() {
                    text.style.font.family = "Montserrat".into();
                    text.style.font.weight = 900;
                    text.style.font.size = 90.0;
                }
                comp.selected = Some(layer.id);
                comp.layers.push(layer);
                true
            }
            Mutation::AddImageLayer => {
                let layer = Layer::image(
                    &format!("Logo {}", comp.layers.len() + 1),
                    IMAGE_LAYER_BOX,
                );
                comp.selected = Some(layer.id);
                comp.layers.push(layer);
                self.status = "Added Image/Logo layer (upload in right panel)".into();
                true
            }
            Mutation::Remove { id } => {
                let removed = comp.remove_layer(id).is_some();
                if removed {
                    self.decodes.remove(&DecodeTarget::Layer(id));
                }
                removed
            }
            Mutation::Duplicate { id } => {
                let Some(copy) = comp.layer(id).map(|l| l.duplicate(&self.config)) else {
                    return false;
                };
                comp.selected = Some(copy.id);
                comp.layers.push(copy);
                true
            }
            Mutation::BringForward { id } => comp.bring_forward(id),
            Mutation::SendBackward { id } => comp.send_backward(id),
            Mutation::ToggleVisible { id } => match comp.layer_mut(id) {
                Some(layer) => {
                    layer.visible = !layer.visible;
                    true
                }
                None => false,
            },
            Mutation::Rename { id, name } => match comp.layer_mut(id) {
                Some(layer) => {
                    layer.name = name;
                    true
                }
                None => false,
            },
            Mutation::EditText { id, edit } => {
                match comp.layer_mut(id).and_then(Layer::as_text_mut) {
                    Some(text) => {
                        edit.apply(text);
                        true
                    }
                    None => false,
                }
            }
            Mutation::EditImage { id, edit } => {
                match comp.layer_mut(id).and_then(Layer::as_image_mut) {
                    Some(image) => {
                        edit.apply(image);
                        true
                    }
                    None => false,
                }
            }
            Mutation::SnapToSafeArea { id } => {
                let safe = comp.format().safe;
                match comp.layer_mut(id) {
                    Some(layer) if layer.is_text() => {
                        let b = &mut layer.bounds;
                        b.x = clamp(b.x, safe.x, safe.x + safe.w - b.w);
                        b.y = clamp(b.y, safe.y, safe.y + safe.h - b.h);
                        true
                    }
                    _ => false,
                }
            }
            Mutation::SetTextColors { id, fill, stroke } => {
                match comp.layer_mut(id).and_then(Layer::as_text_mut) {
                    Some(text) => {
                        text.style.fill = fill;
                        text.style.stroke.color = stroke;
                        true
                    }
                    None => false,
                }
            }
            Mutation::SetFormat(key) => {
                comp.format = key;
                self.status = "Format changed".into();
                true
            }
            Mutation::SetBackgroundFit(fit) => {
                comp.background_fit = fit;
                true
            }
            Mutation::SetDim(dim) => {
                comp.dim = clamp(dim, 0.0, 1.0);
                true
            }
            Mutation::SetDeviceScale(scale) => {
                if !scale.is_finite() || scale <= 0.0 || comp.device_scale == scale {
                    return false;
                }
                comp.device_scale = scale;
                true
            }
            Mutation::ClearBackground => {
                comp.background = None;
                true
            }
            Mutation::ApplyTemplate(template) => {
                comp.format = template.format();
                comp.layers = template.layers();
                comp.selected = comp.layers.first().map(|l| l.id);
                self.decodes.retain(|t, _| *t == DecodeTarget::Background);
                true
            }
            Mutation::NewProject => {
                comp.background = None;
                comp.layers = default_project();
                comp.selected = comp.layers.first().map(|l| l.id);
                self.decodes.clear();
                self.status = "New project created".into();
                true
            }
            Mutation::ApplyHook(hook) => {
                self.apply_hook(hook);
                true
            }
        }
    }

    /// Put a hook on the selected text layer, else on the first text layer
    /// named like a hook, else on a new "Hook" layer.
    fn apply_hook(&mut self, hook: HookSuggestion) {
        let comp = &mut self.composition;
        let target = comp
            .selected_layer()
            .filter(|l| l.is_text())
            .or_else(|| {
                comp.layers
                    .iter()
                    .find(|l| l.is_text() && l.name.to_lowercase().contains("hook"))
            })
            .map(|l| l.id);
        let id = match target {
            Some(id) => id,
            None => {
                let layer = Layer::text("Hook", &hook.text, HOOK_LAYER_BOX);
                let id = layer.id;
                comp.layers.push(layer);
                id
            }
        };

        let placement = hook_placement(comp.format);
        if let Some(layer) = comp.layer_mut(id) {
            layer.bounds = placement.bounds;
            if let Some(text) = layer.as_text_mut() {
                text.content = hook.text;
                hook.preset.apply(&mut text.style);
                text.style.uppercase = true;
                text.style.auto_fit = true;
                if let Some(align) = placement.align {
                    text.style.align = align;
                }
                if let Some(lh) = placement.line_height {
                    text.style.line_height = lh;
                }
            }
        }
        comp.selected = Some(id);
        self.status = "Hook applied".into();
    }

    /// Suggestions for `title`; an empty title yields none.
    pub fn generate_hooks(&mut self, title: &str) -> Vec<HookSuggestion> {
        if title.trim().is_empty() {
            self.status = "Enter a title to generate hooks".into();
            return Vec::new();
        }
        let hooks = hooks::generate_hooks(title);
        self.status = format!("Generated {} hook ideas", hooks.len());
        hooks
    }

    /// Recolor the selected text layer for legibility against the
    /// background, using `scratch` to composite and sample it.
    pub fn apply_auto_contrast<S: Surface + ?Sized>(&mut self, scratch: &mut S) -> bool {
        let Some(layer) = self.composition.selected_layer().filter(|l| l.is_text()) else {
            return false;
        };
        let (id, bounds) = (layer.id, layer.bounds);
        match tc_render::auto_contrast(scratch, &self.composition, bounds) {
            Some(pick) => self.apply(Mutation::SetTextColors {
                id,
                fill: pick.fill,
                stroke: pick.stroke,
            }),
            None => false,
        }
    }

    // ─── Decoding ────────────────────────────────────────────────────────

    /// Start a decode for `target`, superseding any still in flight.
    pub fn begin_decode(&mut self, target: DecodeTarget) -> DecodeTicket {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.decodes.insert(target, generation);
        DecodeTicket { target, generation }
    }

    /// Land a decode result. Stale tickets are dropped; failures only set
    /// the status line. Returns whether the composition changed.
    pub fn finish_decode(&mut self, ticket: DecodeTicket, result: Result<RasterHandle>) -> bool {
        if self.decodes.get(&ticket.target) != Some(&ticket.generation) {
            log::warn!("dropping stale decode for {:?}", ticket.target);
            return false;
        }
        self.decodes.remove(&ticket.target);

        let raster = match result {
            Ok(raster) => raster,
            Err(err) => {
                log::warn!("{err}");
                self.status = err.status_message();
                return false;
            }
        };

        match ticket.target {
            DecodeTarget::Background => {
                self.composition.background = Some(raster);
                self.status = "Background loaded".into();
            }
            DecodeTarget::Layer(id) => {
                let Some(image) = self
                    .composition
                    .layer_mut(id)
                    .and_then(Layer::as_image_mut)
                else {
                    return false;
                };
                image.raster = Some(raster);
                self.status = "Logo/Image loaded into layer".into();
            }
        }
        self.revision += 1;
        true
    }

    /// Decode `bytes` and land them under `ticket`.
    pub fn load_raster(&mut self, ticket: DecodeTicket, bytes: &[u8], source: &str) -> bool {
        let result = decode_raster(bytes, source);
        self.finish_decode(ticket, result)
    }
}
