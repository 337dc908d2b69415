//! Spoqen Vapi Client
//!
//! HTTP client for the upstream voice-AI platform's list-calls API:
//! bearer-authenticated page fetches with a bounded per-attempt timeout
//! and bounded retry with exponential backoff for transient failures.

pub mod client;

pub use client::VapiClient;
