//! Smileworks Render Library
//!
//! Turns a resolved block list into page markup. A fixed registry maps each
//! block collection tag to a presentation handler; handlers render through
//! a lightweight string template system and independently treat absent
//! content as "render nothing".

pub mod blocks;
pub mod document;
pub mod error;
pub mod fallback;
pub mod page;
pub mod registry;
pub mod template;

pub use error::{RenderError, Result};
pub use page::{LEGACY_WELCOME_TITLE, PageRenderer};
pub use registry::{BlockHandler, HandlerRegistry, RenderContext};
pub use template::{Template, TemplateContext};
