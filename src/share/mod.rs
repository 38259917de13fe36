mod compose;
mod download;
mod flow;
mod platform;

pub use compose::*;
pub use download::*;
pub use flow::*;
pub use platform::*;
