mod response;
mod subprocess;
mod subprocess_config;
mod subprocess_error;

pub use response::*;
pub use subprocess::*;
pub use subprocess_config::*;
pub use subprocess_error::*;
