pub mod add;
pub mod config;
pub mod del;
pub mod edit;
pub mod log;
pub mod session;
pub mod settings;
pub mod store;
pub mod validate;
pub mod workspace;
