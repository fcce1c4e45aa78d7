pub mod args;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod run;
