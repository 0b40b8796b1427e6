pub mod admin;
pub mod common;
