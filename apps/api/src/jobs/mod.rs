// Job search across several boards, ranked against the caller's resume,
// plus a per-user list of saved postings.

pub mod analysis;
pub mod boards;
pub mod handlers;
pub mod matching;
pub mod saved;
pub mod search;
