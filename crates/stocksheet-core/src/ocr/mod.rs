//! OCR collaborator: image bytes in, plain text out.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrRecognizer;

use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Turns an uploaded image into text, one recognized line per text line.
pub trait TextRecognizer {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

/// Vertical band height used to group boxes into one reading line.
const ROW_BAND: f32 = 20.0;

/// A detected text box with its coordinates and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Get the axis-aligned top-left corner.
    pub fn top_left(&self) -> (f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        (
            xs.iter().cloned().fold(f32::INFINITY, f32::min),
            ys.iter().cloned().fold(f32::INFINITY, f32::min),
        )
    }
}

/// Average recognition confidence, `None` for no boxes.
pub fn mean_confidence(boxes: &[TextBox]) -> Option<f32> {
    if boxes.is_empty() {
        return None;
    }
    Some(boxes.iter().map(|b| b.confidence).sum::<f32>() / boxes.len() as f32)
}

/// Sort boxes top-to-bottom, then left-to-right within a band.
pub fn sort_by_reading_order(boxes: &mut [TextBox]) {
    boxes.sort_by(|a, b| {
        let (ax, ay) = a.top_left();
        let (bx, by) = b.top_left();
        let row_a = (ay / ROW_BAND) as i32;
        let row_b = (by / ROW_BAND) as i32;

        if row_a != row_b {
            row_a.cmp(&row_b)
        } else {
            ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
        }
    });
}

/// Join boxes into text, putting boxes from the same band on one line.
///
/// A handwritten "Sugar ..... 5 kg" is often detected as two boxes; keeping
/// them on one line lets the item and its quantity be matched together.
pub fn boxes_to_text(boxes: &[TextBox]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current_band: Option<i32> = None;

    for text_box in boxes {
        let band = (text_box.top_left().1 / ROW_BAND) as i32;
        if current_band == Some(band) {
            if let Some(line) = lines.last_mut() {
                line.push(' ');
                line.push_str(&text_box.text);
                continue;
            }
        }
        lines.push(text_box.text.clone());
        current_band = Some(band);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_box(x: f32, y: f32, text: &str) -> TextBox {
        TextBox {
            bbox: [x, y, x + 50.0, y, x + 50.0, y + 10.0, x, y + 10.0],
            text: text.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_reading_order_and_line_grouping() {
        let mut boxes = vec![
            text_box(10.0, 45.0, "Milk"),
            text_box(200.0, 2.0, "5 kg"),
            text_box(10.0, 5.0, "Sugar"),
            text_box(210.0, 48.0, "2 ltr"),
        ];

        sort_by_reading_order(&mut boxes);

        assert_eq!(boxes_to_text(&boxes), "Sugar 5 kg\nMilk 2 ltr");
    }

    #[test]
    fn test_no_boxes() {
        assert_eq!(boxes_to_text(&[]), "");
    }

    #[test]
    fn test_mean_confidence() {
        let mut low = text_box(0.0, 0.0, "Sugar");
        low.confidence = 0.5;
        let boxes = [low, text_box(60.0, 0.0, "5 kg")];

        assert!((mean_confidence(&boxes).unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(mean_confidence(&[]), None);
    }
}
