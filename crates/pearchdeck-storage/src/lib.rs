pub mod file;
pub mod mem;
pub mod traits;

pub use file::FileSettingsStore;
pub use mem::InMemorySettingsStore;
pub use traits::*;
