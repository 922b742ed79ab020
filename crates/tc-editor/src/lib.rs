pub mod edits;
pub mod input;
pub mod store;
pub mod templates;
pub mod tools;

pub use edits::{ImageEdit, TextEdit, parse_background_fit};
pub use input::{InputEvent, Modifiers};
pub use store::{ComposerStore, DecodeTarget, DecodeTicket, Mutation};
pub use templates::{Template, default_project};
pub use tools::{DragMode, SelectTool, Tool};
