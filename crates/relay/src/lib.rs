//! Terraform Cloud to Discord relay service.
//!
//! Receives Terraform Cloud notification webhooks over HTTP and forwards them
//! to a Discord webhook via [`tfc_notify::Forwarder`].

pub mod config;
pub mod server;
