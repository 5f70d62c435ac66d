// Path Planning algorithms module

pub mod dubins_path;

pub use dubins_path::*;
