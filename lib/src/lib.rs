//! A library for embedding character cards into PNG images and reading them back.
//!
//! Character cards are JSON documents stored in `tEXt` chunks of an otherwise
//! ordinary PNG image. This crate walks the chunk stream of an in-memory PNG
//! buffer, extracts the card payload (`ccv3` or the legacy `chara` keyword)
//! along with any side-car assets, and rewrites the stream to carry exactly one
//! fresh set of card chunks right before `IEND`.
//!
//! # Examples
//! ```
//! use libccpng::{CardKind, GenerateOptions};
//!
//! # fn main() -> Result<(), libccpng::CardError> {
//! # let png = include_bytes!("../../resources/test/plain.png");
//! let card = r#"{"spec":"chara_card_v2","data":{"name":"Alice"}}"#;
//! let exported = libccpng::generate(png, card, &GenerateOptions::default())?;
//!
//! let recovered = libccpng::parse(&exported)?;
//! assert_eq!(recovered.kind(), CardKind::Chara);
//! assert_eq!(recovered.text(), card);
//! # Ok(())
//! # }
//! ```
pub(crate) mod card;
pub(crate) mod chunk;
pub(crate) mod error;
pub(crate) mod generate;
pub(crate) mod png;
pub mod prelude;
pub(crate) mod text;

pub use card::*;
pub use chunk::*;
pub use error::*;
pub use generate::*;
pub use png::*;
pub use text::*;
