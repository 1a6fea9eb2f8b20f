mod load_compare;
mod upload_generate;
