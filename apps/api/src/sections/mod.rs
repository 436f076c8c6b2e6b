// Section ordering engine: one global order of section keys, split into
// template regions and edited through swap / drag-and-drop reorders.
// Everything here is synchronous and free of I/O.

pub mod drag;
pub mod key;
pub mod order;
pub mod presence;
pub mod regions;
pub mod reorder;

pub use key::SectionKey;
pub use order::{normalize, SectionOrder};
pub use presence::has_content;
pub use regions::{merge, split, Regions, Scope};
pub use reorder::{drop_on_target, move_adjacent, Direction};
