mod complete;
mod embed;
mod extract;
mod info;
mod strip;
pub mod utils;
