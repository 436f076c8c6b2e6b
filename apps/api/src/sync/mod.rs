pub mod debounce;
pub mod drafts;

pub use drafts::DraftSync;
