pub mod contrast;
pub mod error;
pub mod export;
pub mod hit;
pub mod paint;
pub mod recording;
pub mod surface;

pub use contrast::{ContrastPick, auto_contrast};
pub use error::RenderError;
pub use export::{ExportFormat, encode_rgba, export_filename};
pub use hit::{hit_test_handle, hit_test_layers};
pub use paint::{RenderOptions, paint_background, render};
pub use recording::{DrawOp, RecordingSurface};
pub use surface::{Filter, ShadowParams, Surface, TextBaseline, TextRun};
