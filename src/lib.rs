pub mod cli;
pub mod normalize;
pub mod process;
