mod output;
pub mod render;
mod table;

pub use output::Output;
pub use table::TextTable;
