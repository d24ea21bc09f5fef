//! AI functions: each builds one prompt, makes one model call, validates the
//! JSON reply and only then stores anything.

pub mod assistant;
pub mod candidate;
pub mod career;
pub mod compare;
pub mod extract;
pub mod handlers;
pub mod insights;
pub mod prompts;
pub mod schema;
pub mod screening;
