mod comparison;
mod documents;
mod models;
mod reports;
