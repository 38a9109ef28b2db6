mod pinned;

pub use pinned::*;
