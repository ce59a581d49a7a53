pub mod config;
pub mod logging;

pub mod coordinator;
pub mod error;
pub mod gate;
pub mod layout;
pub mod transfer;
pub mod url_model;
