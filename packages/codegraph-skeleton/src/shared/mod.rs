pub mod cancellation;
pub mod constants;
pub mod error;

pub use cancellation::CancellationToken;
pub use error::{CodegraphError, ErrorKind, Result};
