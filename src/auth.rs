//! Auth-domain identifiers, grant parameters, and token models.

pub mod id;
pub mod params;
pub mod token;

pub use id::*;
pub use params::*;
pub use token::*;
