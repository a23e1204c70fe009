//! Quote Service - daily mental-health quotes with AI generation and static fallback.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
