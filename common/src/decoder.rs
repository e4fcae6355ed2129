//! バーコードデコーダ
//!
//! 解析そのものは外部ライブラリ（rxing）に任せる。
//! ここでは画像のデコードと失敗の分類のみ行う。

use crate::error::{DecodeFailure, Result};
use crate::types::SelectedImage;

/// デコーダ設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// 1枚から複数のバーコードを読む
    pub multiple: bool,
    /// 長辺がこれを超える画像は縮小してから解析（0で無効）
    pub max_image_size: u32,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            multiple: false,
            max_image_size: 2048,
        }
    }
}

/// 外部デコード機能との境界
pub trait BarcodeDecoder {
    /// 1件だけ読む
    fn decode(&self, image: &SelectedImage) -> Result<String>;

    /// 見つかったものをすべて読む
    fn decode_all(&self, image: &SelectedImage) -> Result<Vec<String>> {
        self.decode(image).map(|text| vec![text])
    }
}

/// 設定に応じて `decode` / `decode_all` を呼び分ける
pub fn run_decode<D>(decoder: &D, image: &SelectedImage, options: &DecoderOptions) -> Result<Vec<String>>
where
    D: BarcodeDecoder + ?Sized,
{
    if image.is_empty() {
        return Err(DecodeFailure::Other("empty file".into()));
    }
    if options.multiple {
        decoder.decode_all(image)
    } else {
        decoder.decode(image).map(|text| vec![text])
    }
}

#[cfg(feature = "decoder")]
pub use self::rxing_impl::RxingDecoder;

#[cfg(feature = "decoder")]
mod rxing_impl {
    use super::{BarcodeDecoder, DecoderOptions};
    use crate::error::{DecodeFailure, Result};
    use crate::types::SelectedImage;
    use rxing::{DecodeHintType, DecodeHintValue, DecodingHintDictionary, Exceptions};
    use tracing::debug;

    /// rxing によるデコーダ
    #[derive(Debug, Clone, Default)]
    pub struct RxingDecoder {
        options: DecoderOptions,
    }

    impl RxingDecoder {
        pub fn new(options: DecoderOptions) -> Self {
            Self { options }
        }

        /// 画像をグレースケールに変換（必要なら縮小）
        fn to_luma(&self, image: &SelectedImage) -> Result<(Vec<u8>, u32, u32)> {
            let decoded = ::image::load_from_memory(&image.bytes)
                .map_err(|e| DecodeFailure::Other(format!("{}: {}", image.file_name, e)))?;

            let max = self.options.max_image_size;
            let decoded = if max > 0 && (decoded.width() > max || decoded.height() > max) {
                debug!(
                    file = %image.file_name,
                    width = decoded.width(),
                    height = decoded.height(),
                    max,
                    "画像を縮小"
                );
                decoded.thumbnail(max, max)
            } else {
                decoded
            };

            let luma = decoded.to_luma8();
            let (width, height) = luma.dimensions();
            Ok((luma.into_raw(), width, height))
        }
    }

    impl BarcodeDecoder for RxingDecoder {
        fn decode(&self, image: &SelectedImage) -> Result<String> {
            let (luma, width, height) = self.to_luma(image)?;
            // detect_in_luma は幅と高さを入れ替えて渡すため _with_hints を直接呼ぶ
            let mut hints = try_harder_hints();
            let result = rxing::helpers::detect_in_luma_with_hints(luma, width, height, None, &mut hints)
                .map_err(classify)?;
            debug!(file = %image.file_name, format = ?result.getBarcodeFormat(), "バーコード検出");
            Ok(result.getText().to_string())
        }

        fn decode_all(&self, image: &SelectedImage) -> Result<Vec<String>> {
            let (luma, width, height) = self.to_luma(image)?;
            let mut hints = try_harder_hints();
            let results = rxing::helpers::detect_multiple_in_luma_with_hints(luma, width, height, &mut hints)
                .map_err(classify)?;
            if results.is_empty() {
                return Err(DecodeFailure::NotFound);
            }
            debug!(file = %image.file_name, count = results.len(), "バーコード検出");
            Ok(results.iter().map(|r| r.getText().to_string()).collect())
        }
    }

    fn try_harder_hints() -> DecodingHintDictionary {
        let mut hints = DecodingHintDictionary::new();
        hints.insert(DecodeHintType::TRY_HARDER, DecodeHintValue::TryHarder(true));
        hints
    }

    /// rxing の例外を2分類に変換
    fn classify(error: Exceptions) -> DecodeFailure {
        match error {
            Exceptions::NotFoundException(_) => DecodeFailure::NotFound,
            other => DecodeFailure::Other(format!("{other:?}")),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use image::{GrayImage, ImageFormat, Luma};
        use std::io::Cursor;

        fn png_bytes(img: &GrayImage) -> Vec<u8> {
            let mut buf = Cursor::new(Vec::new());
            img.write_to(&mut buf, ImageFormat::Png).unwrap();
            buf.into_inner()
        }

        /// 白いキャンバス（width x height）の左上寄りにQRコードを描く
        fn qr_png(text: &str, width: u32, height: u32) -> Vec<u8> {
            use rxing::{BarcodeFormat, MultiFormatWriter, Writer};
            let matrix = MultiFormatWriter::default()
                .encode(text, &BarcodeFormat::QR_CODE, 200, 200)
                .unwrap();
            let (offset_x, offset_y) = (20, 20);
            let img = GrayImage::from_fn(width, height, |x, y| {
                let inside = x >= offset_x
                    && y >= offset_y
                    && x - offset_x < matrix.width()
                    && y - offset_y < matrix.height();
                if inside && matrix.get(x - offset_x, y - offset_y) {
                    Luma([0u8])
                } else {
                    Luma([255u8])
                }
            });
            png_bytes(&img)
        }

        #[test]
        fn test_decode_qr_code() {
            let image = SelectedImage::new("qr.png", qr_png("12345", 240, 240));
            let decoder = RxingDecoder::default();
            assert_eq!(decoder.decode(&image), Ok("12345".to_string()));
        }

        #[test]
        fn test_decode_qr_code_on_landscape_canvas() {
            let image = SelectedImage::new("photo.png", qr_png("12345", 640, 480));
            let decoder = RxingDecoder::default();
            assert_eq!(decoder.decode(&image), Ok("12345".to_string()));
            assert_eq!(decoder.decode_all(&image), Ok(vec!["12345".to_string()]));
        }

        #[test]
        fn test_decode_qr_code_on_portrait_canvas() {
            let image = SelectedImage::new("photo.png", qr_png("67890", 240, 400));
            let decoder = RxingDecoder::default();
            assert_eq!(decoder.decode(&image), Ok("67890".to_string()));
        }

        #[test]
        fn test_blank_image_is_not_found() {
            let blank = GrayImage::from_pixel(120, 80, Luma([255u8]));
            let image = SelectedImage::new("blank.png", png_bytes(&blank));
            let decoder = RxingDecoder::default();
            assert_eq!(decoder.decode(&image), Err(DecodeFailure::NotFound));
        }

        #[test]
        fn test_garbage_bytes_is_other_error() {
            let image = SelectedImage::new("broken.png", b"not an image".to_vec());
            let decoder = RxingDecoder::default();
            let err = decoder.decode(&image).unwrap_err();
            assert!(matches!(err, DecodeFailure::Other(_)));
            assert!(err.to_string().contains("broken.png"));
        }

        #[test]
        fn test_large_image_is_downscaled() {
            let decoder = RxingDecoder::new(DecoderOptions {
                multiple: false,
                max_image_size: 64,
            });
            let big = GrayImage::from_pixel(256, 128, Luma([255u8]));
            let image = SelectedImage::new("big.png", png_bytes(&big));
            let (luma, width, height) = decoder.to_luma(&image).unwrap();
            assert_eq!((width, height), (64, 32));
            assert_eq!(luma.len(), 64 * 32);
        }
    }
}
