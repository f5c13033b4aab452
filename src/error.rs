pub use anyhow::Context;
pub use anyhow::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
