pub mod assemble;
pub mod config;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod select;
pub mod template;
