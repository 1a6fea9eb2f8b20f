mod client;
mod config;
