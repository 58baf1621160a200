pub mod handlers;
pub mod style;
