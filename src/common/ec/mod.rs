mod block;
mod encoder;
mod galois;

pub(crate) use block::*;
pub use encoder::*;
pub(crate) use galois::*;

pub const MAX_BLOCK_SIZE: usize = 256;

pub const MAX_EC_SIZE: usize = 64;
