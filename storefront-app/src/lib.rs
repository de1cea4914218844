pub mod console;
pub mod storefront;

pub use console::{Command, CommandError, ConsoleSurface};
pub use storefront::Storefront;
