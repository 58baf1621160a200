pub mod hired_agent;
pub mod history;
pub mod profile;
pub mod saved_job;
pub mod upload;
pub mod user;
