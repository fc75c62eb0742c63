//! OpenMensa canteen menus exposed as polled sensors.

pub mod cli;
pub mod commands;
pub mod integration;

pub use integration::MensaIntegration;
