//! Shared test utilities: configuration builders, device page builders,
//! fixtures and an in-memory gateway.

#![cfg(test)]

pub mod config;
pub mod fixtures;
pub mod html;
