pub mod error;
pub mod format;
pub mod json;
pub mod logger;
pub mod validation;
