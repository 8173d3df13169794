pub mod config;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod models;
pub mod render;
pub mod repositories;
pub mod services;
pub mod session;
pub mod timer;

#[cfg(test)]
pub mod test_utils;
