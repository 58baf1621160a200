// Generation history: every signed-in generation is saved verbatim and can
// be listed, re-opened, or deleted by its owner.

pub mod handlers;
pub mod store;
