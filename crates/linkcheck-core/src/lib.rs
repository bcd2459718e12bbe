pub mod config;
pub mod logging;

pub mod extract;
pub mod fetch;
pub mod hosts;
pub mod output;
pub mod pipeline;
pub mod validate;
