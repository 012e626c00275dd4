pub mod extension;
pub mod header;
pub mod helpers;
pub mod main;
pub mod records;
pub mod session;

pub use header::*;
pub use helpers::*;
pub use main::*;
pub use records::*;
pub use session::*;
