#![doc = include_str!(concat!(env!("OUT_DIR"), "/README-lib.md"))]
#![forbid(unsafe_code)]
#![deny(clippy::print_stdout, clippy::print_stderr)]

extern crate alloc;
#[macro_use]
extern crate lazy_static;

mod config;
mod constants;
mod decimal;
mod engine;
mod error;
mod maths;
mod ops;
mod round;
mod str;

#[cfg(feature = "proptest")]
mod proptest;
#[cfg(feature = "rand")]
mod rand;
#[cfg(feature = "serde")]
pub mod serde;

pub use config::{Config, ConfigOptions, ModeValue, ModuloMode, RoundingMode};
pub use decimal::{Decimal, Kind};
pub use engine::{config_derive, config_set, decimal, default_engine, is_decimal, pow, Engine, Input};
pub use error::Error;
pub use maths::MathematicalOps;

/// A convenience module appropriate for glob imports (`use bigdecimal_engine::prelude::*;`).
pub mod prelude {
    pub use crate::config::{ConfigOptions, ModuloMode, RoundingMode};
    pub use crate::decimal::Decimal;
    pub use crate::engine::{default_engine, Engine};
    pub use crate::maths::MathematicalOps;
    pub use core::str::FromStr;
    pub use num_traits::{One, Pow, ToPrimitive, Zero};
}
