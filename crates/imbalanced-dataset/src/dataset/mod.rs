mod base;
mod in_memory;
mod iterator;

pub use base::*;
pub use in_memory::*;
pub use iterator::*;
