//! Transaction payload building.

mod builder;
mod random;

pub use builder::{CreatePaymentArgs, PayloadBuilder};
pub use random::{FixedRandomSource, RandomSource, ThreadRandomSource};
