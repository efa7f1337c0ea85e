//! Core domain types shared by every pipeline stage.

pub mod context;
pub mod error;
pub mod text;
