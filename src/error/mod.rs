mod types;

pub use types::{EditorError, Result};
