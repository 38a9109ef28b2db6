mod announcement;
mod channel;
mod pinned;

pub use announcement::*;
pub use channel::*;
pub use pinned::*;
