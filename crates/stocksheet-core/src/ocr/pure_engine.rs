//! Pure Rust OCR recognizer using `pure-onnx-ocr`.

use std::time::Instant;

use image::GenericImageView;
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::{
    boxes_to_text, mean_confidence, sort_by_reading_order, TextBox, TextRecognizer,
};

/// OCR backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct PureOcrRecognizer {
    engine: pure_onnx_ocr::engine::OcrEngine,
    keep_unk: bool,
}

impl PureOcrRecognizer {
    /// Load detection, recognition and dictionary files named in `config`.
    pub fn from_config(config: &OcrConfig) -> Result<Self, OcrError> {
        if !config.models_present() {
            return Err(OcrError::ModelLoad(format!(
                "OCR models not found in {}",
                config.model_dir.display()
            )));
        }

        let det_path = config.model_path(&config.detection_model);
        let rec_path = config.model_path(&config.recognition_model);
        let dict_path = config.model_path(&config.dictionary);

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", config.model_dir.display());

        Ok(Self {
            engine,
            keep_unk: config.keep_unk,
        })
    }
}

impl TextRecognizer for PureOcrRecognizer {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
        let start = Instant::now();

        let image = image::load_from_memory(image_bytes)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;
        let (width, height) = image.dimensions();
        debug!("Decoded image: {}x{}", width, height);

        let results = self
            .engine
            .run_from_image(&image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        let mut boxes: Vec<TextBox> = results
            .iter()
            .map(|r| TextBox {
                bbox: polygon_to_bbox(&r.bounding_box),
                text: if self.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                },
                confidence: r.confidence,
            })
            .collect();

        sort_by_reading_order(&mut boxes);
        let text = boxes_to_text(&boxes);

        info!(
            "OCR complete: {} text boxes in {}ms (mean confidence {:.2})",
            boxes.len(),
            start.elapsed().as_millis(),
            mean_confidence(&boxes).unwrap_or(0.0)
        );

        Ok(text)
    }
}

/// Convert a `Polygon<f64>` to our `[f32; 8]` bbox format.
fn polygon_to_bbox(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 8] {
    let mut bbox = [0.0f32; 8];
    for (i, coord) in polygon.exterior().coords().take(4).enumerate() {
        bbox[i * 2] = coord.x as f32;
        bbox[i * 2 + 1] = coord.y as f32;
    }
    bbox
}
