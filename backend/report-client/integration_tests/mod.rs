mod api;
mod error;
mod helpers;
mod workflow;
