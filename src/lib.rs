//! Translation proxy for DeepL, Google, Lingva and MyMemory, plus the
//! debounced controller that drives it from a client.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod i18n;
pub mod server;
pub mod translate;
