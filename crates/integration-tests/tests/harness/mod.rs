//! Shared fixtures: config builder, mock provider, and a server on port 0

#![allow(dead_code)]

pub mod config;
pub mod mock_llm;
pub mod server;
