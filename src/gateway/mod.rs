//! Gateway implementations

mod builder;
mod pricing;

pub use builder::{Lustre, LustreBuilder};
pub use pricing::PricingGateway;
