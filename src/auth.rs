//! Bearer credentials and the sources they are read from.

pub mod secret;
pub mod source;

pub use secret::*;
pub use source::*;
