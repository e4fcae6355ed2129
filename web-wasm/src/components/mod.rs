pub mod barcode_list;
pub mod decoding_indicator;
pub mod error_panel;
pub mod header;
pub mod image_preview;
pub mod upload_button;
