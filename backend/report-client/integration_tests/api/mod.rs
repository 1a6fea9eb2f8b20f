mod download;
mod files;
mod model;
mod report;
mod retry;
mod upload;
