//! External service integrations

pub mod halo;
