// Adapters layer: concrete implementations for external systems.

pub mod gemini;
pub mod storage;

pub use gemini::GeminiGenerator;
pub use storage::LocalStorage;
