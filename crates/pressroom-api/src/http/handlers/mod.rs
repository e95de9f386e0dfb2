//! HTTP request handlers.

pub mod action;
pub mod revalidate;
