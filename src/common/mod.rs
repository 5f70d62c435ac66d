//! Common types, traits, and error definitions for dubins_routing
//!
//! This module provides the foundational building blocks used by the
//! planning algorithms in this crate.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
