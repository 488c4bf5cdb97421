pub mod dictionary;
pub mod pool;

pub use dictionary::WordListError;
pub use pool::WordPool;
