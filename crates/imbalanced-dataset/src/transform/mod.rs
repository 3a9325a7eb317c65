mod args;
mod options;
mod partition;
mod resample;
mod wrapper;

pub use args::*;
pub use options::*;
pub use partition::*;
pub use resample::*;
pub use wrapper::*;
