pub mod compile;
pub mod endpoints;
pub mod errors;
pub mod filter;
pub mod pricing;
pub mod projector;
pub mod render;
pub mod request;
pub mod response;
pub mod settings;
pub mod snippet;
pub mod util;

pub use compile::*;
pub use errors::*;
pub use filter::*;
pub use projector::{classify_email, project, EmailKind, ProjectedProfile};
pub use request::*;
pub use response::*;
pub use settings::*;
