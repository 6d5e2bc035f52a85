// Adapters layer: concrete implementations of the domain ports (extraction service, storage).

pub mod gemini;
pub mod storage;
