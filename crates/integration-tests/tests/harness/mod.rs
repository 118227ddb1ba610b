#![allow(dead_code)]

pub mod config;
pub mod mock_gemini;
pub mod mock_stripe;
pub mod mock_tts;
pub mod server;
