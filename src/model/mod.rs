pub mod column;
pub mod config;
pub mod expansion;
pub mod fixture;
pub mod table;
pub mod task;

pub use column::*;
pub use config::*;
pub use expansion::*;
pub use table::*;
pub use task::*;
