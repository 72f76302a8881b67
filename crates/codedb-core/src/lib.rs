//! # codedb-core
//!
//! Core types and error types for CodeDB sample submission.
//!
//! This crate provides the foundational types shared across all codedb crates:
//! - Remote status values and binary/variant kind enums
//! - Sample files with content-derived SHA-256 identity, and their variants
//! - The analysis results document produced by the local pipeline
//! - Upload metadata rendered into multipart form fields
//! - Wire response types for the status and upload endpoints
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod metadata;
pub mod responses;
pub mod results;
pub mod sample;
