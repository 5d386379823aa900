// Library exports for testing
// The binary (main.rs) imports these as well

pub mod alert;
pub mod app;
pub mod commands;
pub mod error;
pub mod logger;
pub mod render;
pub mod settings;

#[cfg(test)]
mod tests;
