mod app;
mod toggles;
mod env;
mod help;

pub use app::*;
pub use toggles::*;
pub use help::*;
