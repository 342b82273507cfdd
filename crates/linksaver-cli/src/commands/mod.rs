//! Command handlers

pub mod config;
pub mod folder;
pub mod link;
pub mod tag;
pub mod transfer;
