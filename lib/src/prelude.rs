//! ccpng Prelude.
//!
//! The purpose of this module is to alleviate imports of the common chunk traits
//! by adding a glob import to modules:
//!
//! ```
//! # #![allow(unused_imports)]
//! use libccpng::prelude::*;
//! ```
pub use crate::Chunk;
