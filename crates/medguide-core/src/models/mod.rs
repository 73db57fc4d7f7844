//! Domain models for the medication guide.

mod dose;
mod medication;
mod view;

pub use dose::*;
pub use medication::*;
pub use view::*;
