pub mod export;
pub mod file_operations;
pub mod render;

pub use export::*;
pub use file_operations::*;
pub use render::*;
