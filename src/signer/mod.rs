mod claims;
mod signer;
mod signer_error;
mod signing_algorithm;
mod token_header;

pub use claims::*;
pub use signer::*;
pub use signer_error::*;
pub use signing_algorithm::*;
pub use token_header::*;
