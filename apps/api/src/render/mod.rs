// Template rendering: resume document + style settings -> visual tree -> static HTML.
// Rendering is pure; photo URLs are resolved by the caller beforehand.

pub mod components;
pub mod document;
pub mod format;
pub mod node;
pub mod templates;
pub mod theme;

pub use document::html_document;
pub use templates::{lookup, RenderContext, TemplateDescriptor};
