pub mod assets;
pub mod character;
pub mod config;
pub mod error;
pub mod share;
pub mod storage;
pub mod tutorial;

// Re-export common error type
pub use error::CatrineandoError;
