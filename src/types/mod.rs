pub mod flight;
pub mod header;
pub mod record;

pub use flight::*;
pub use header::*;
pub use record::*;
