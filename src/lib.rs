// Library exports for hybrid-desk
// This allows the test suite to import modules

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod display;
pub mod event_handler;
pub mod ipc;
pub mod logging;
pub mod session;
pub mod ui;
