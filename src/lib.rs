pub mod auth;
pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod display;
pub mod engine;
pub mod error;
pub mod events;
pub mod prompts;
pub mod sanitize;
pub mod spinner;
pub mod thinker;
pub mod typeset;
