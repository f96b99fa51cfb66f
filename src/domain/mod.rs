mod errors;
mod id;
mod langcode;
mod payload;
mod secret;
mod username;

pub use errors::*;
pub use id::*;
pub use langcode::*;
pub use payload::*;
pub use secret::*;
pub use username::*;
