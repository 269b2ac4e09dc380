//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Random tokens and generated secrets
//! - Password policy and Argon2id hashing
//! - Cookie management
//! - SQLite connection pool and embedded migrations

pub mod cookie;
pub mod crypto;
pub mod database;
pub mod password;
