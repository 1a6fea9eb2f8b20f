mod comparison;
mod document;
mod upload;
