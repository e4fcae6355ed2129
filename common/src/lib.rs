//! Barcode Scan Common Library
//!
//! CLIとWeb(WASM)で共有される画面状態・遷移・デコーダ境界

pub mod barcodes;
pub mod decoder;
pub mod error;
pub mod state;
pub mod types;

pub use barcodes::ScannedBarcodes;
pub use decoder::{run_decode, BarcodeDecoder, DecoderOptions};
#[cfg(feature = "decoder")]
pub use decoder::RxingDecoder;
pub use error::{DecodeFailure, Result, DECODE_FAILURE_MESSAGE, NOT_FOUND_MESSAGE};
pub use state::{Action, DecodeOutcome, ScanState, Transition};
pub use types::{ScanPhase, SelectedImage, SelectionId};
