pub mod config;
pub mod presenter;
pub mod session;
