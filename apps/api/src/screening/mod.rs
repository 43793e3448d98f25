// Resume screening engine and its HTTP surface.
// Extraction → matching → scoring are pure; handlers own all session I/O.

pub mod comparison;
pub mod dashboard;
pub mod extraction;
pub mod handlers;
pub mod matcher;
pub mod prompts;
pub mod scoring;
pub mod suggestions;
