//! CLI Commands

pub mod account;
pub mod config;
pub mod demo;
pub mod services;
pub mod workspace;
