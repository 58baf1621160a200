// Agent marketplace: the catalog of agents, prompt composition, and the
// generation pipeline that turns raw user input into one upstream call.

pub mod catalog;
pub mod handlers;
pub mod hashtags;
pub mod hiring;
pub mod lifecycle;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod router;
pub mod service;
