mod download;
mod error;
mod logger;
mod merger;
mod normalizer;
mod retry;
mod workflow;
