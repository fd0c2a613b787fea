//! Sandbox environment helpers.
//!
//! Zellij plugins see the host filesystem under `/host`; everything that turns
//! a user-supplied path into a sandbox path goes through here.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, strip_host_prefix};
