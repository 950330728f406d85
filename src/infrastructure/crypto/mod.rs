//! Hashing primitives for credentials and bearer tokens

pub mod password;
pub mod token;
