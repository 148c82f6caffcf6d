//! Core data types shared across Conclave crates

pub mod account;
