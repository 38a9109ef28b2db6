mod id;
mod text;
mod langcode;

pub use id::*;
pub use text::*;
pub use langcode::*;
