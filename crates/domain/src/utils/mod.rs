//! Pure helpers shared by the request and payload code

pub mod json;
pub mod lenient;
pub mod text;
pub mod vocabulary;
