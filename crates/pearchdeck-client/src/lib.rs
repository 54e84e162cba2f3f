pub mod config;
pub mod metrics;
pub mod session;
pub mod transport;

pub use config::ClientConfig;
pub use session::{SearchSession, SearchState};
pub use transport::{HttpTransport, SearchTransport};
