/// Renderer module - the interfaces the engine hands data to

// Module declarations
pub mod uniform_sink;

// Re-export from other modules
pub use uniform_sink::*;
