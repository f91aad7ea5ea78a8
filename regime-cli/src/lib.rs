pub mod cli;
pub mod logging;
pub mod render;
pub mod utils;
