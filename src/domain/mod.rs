pub mod primitives;
pub mod objects;

pub use primitives::*;
pub use objects::*;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::Constructor)]
#[display("DomainAssertionError for value '{}': {}", value, message)]
pub struct DomainAssertionError {
    value: String,
    message: &'static str
}
