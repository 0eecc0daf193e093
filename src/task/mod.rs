pub mod operations;
pub mod parse;
pub mod recurrence;
pub mod store;
pub mod types;


pub use operations::*;
pub use parse::*;
pub use recurrence::*;
pub use store::*;
pub use types::*;
