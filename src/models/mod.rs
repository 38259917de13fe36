mod account;
mod category;
mod product;
mod selection;
mod share_options;

pub use account::*;
pub use category::*;
pub use product::*;
pub use selection::*;
pub use share_options::*;
