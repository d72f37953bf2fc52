pub mod app;
pub mod edit;
pub mod input;
pub mod render;
pub mod theme;
pub mod tree;

pub use app::run;
