// Adapters layer: concrete implementations for external systems (model API, storage).

pub mod gemini;
pub mod storage;
