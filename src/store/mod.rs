pub mod json_store;
pub mod memory;

use thiserror::Error;

pub use json_store::JsonStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
    #[error("high score storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value port used for best scores. One key per mode.
pub trait HighScoreStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
