pub mod config_service;
pub mod dto;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::CatrineandoPaths;
pub use crate::storage::{FileKeyValueStorage, InMemoryStorage};
