//! Core DeepL client engine

pub mod client;
pub mod config;
pub mod document;
pub mod errors;
pub mod languages;
pub mod models;
pub mod storage;
pub mod translate;
pub mod usage;
