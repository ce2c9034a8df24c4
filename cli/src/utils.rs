pub(crate) mod fs;
mod path;

pub(crate) use path::*;
