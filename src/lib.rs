//! Slidekick Library
//!
//! Core modules for speech-driven slide navigation.

pub mod asr;
pub mod audio;
pub mod config;
pub mod core;
pub mod embed;
pub mod error;
pub mod input;
pub mod matching;
pub mod navigator;
pub mod session;
