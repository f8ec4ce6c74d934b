use serde::{Deserialize, Serialize};

/// Payload posted to the prediction endpoint.
///
/// Fields that could not be read from the form are `None` and go over the
/// wire as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionRequest {
    #[serde(rename = "BathroomsFull")]
    pub bathrooms_full: Option<i64>,
    #[serde(rename = "BathroomsHalf")]
    pub bathrooms_half: Option<i64>,
    #[serde(rename = "BedroomsTotal")]
    pub bedrooms_total: Option<i64>,
    #[serde(rename = "LivingArea")]
    pub living_area: Option<f64>,
}

impl PredictionRequest {
    /// Full baths plus half baths counted as one half each.
    pub fn bathrooms(&self) -> Option<f64> {
        let full = self.bathrooms_full?;
        let half = self.bathrooms_half?;
        Some(lossy_f64(full) + lossy_f64(half) * 0.5)
    }

    /// Label/value pairs shown under the estimate.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        use crate::formatting::format_number;

        let area = match self.living_area {
            Some(value) if value.is_finite() => format!("{} sq ft", format_number(Some(value))),
            _ => "-".to_string(),
        };
        vec![
            ("Living Area", area),
            ("Bedrooms", format_number(self.bedrooms_total.map(lossy_f64))),
            ("Bathrooms", format_number(self.bathrooms())),
        ]
    }
}

#[allow(clippy::cast_precision_loss)]
fn lossy_f64(value: i64) -> f64 {
    value as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PredictionResult {
    pub predicted_price: f64,
}

impl PredictionResult {
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::around(self.predicted_price)
    }
}

/// Fixed ±5% interval around a price. Not a statistical estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceBand {
    pub low: f64,
    pub high: f64,
}

impl ConfidenceBand {
    pub const SPREAD: f64 = 0.05;

    pub fn around(price: f64) -> Self {
        Self {
            low: price * (1.0 - Self::SPREAD),
            high: price * (1.0 + Self::SPREAD),
        }
    }
}

/// User-facing failure shown in place of a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn request() -> PredictionRequest {
        PredictionRequest {
            bathrooms_full: Some(2),
            bathrooms_half: Some(1),
            bedrooms_total: Some(3),
            living_area: Some(1800.0),
        }
    }

    #[test]
    fn serializes_wire_field_names() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(
            value,
            json!({
                "BathroomsFull": 2,
                "BathroomsHalf": 1,
                "BedroomsTotal": 3,
                "LivingArea": 1800.0
            })
        );
    }

    #[test]
    fn missing_fields_serialize_as_null() {
        let req = PredictionRequest {
            bathrooms_full: None,
            living_area: None,
            ..request()
        };
        let value = serde_json::to_value(req).unwrap();
        assert!(value["BathroomsFull"].is_null());
        assert!(value["LivingArea"].is_null());
        assert_eq!(value["BedroomsTotal"], json!(3));
    }

    #[test]
    fn summary_lists_area_bedrooms_and_bathrooms() {
        assert_eq!(
            request().summary(),
            vec![
                ("Living Area", "1800 sq ft".to_string()),
                ("Bedrooms", "3".to_string()),
                ("Bathrooms", "2.5".to_string()),
            ]
        );
    }

    #[test]
    fn bathrooms_unknown_when_any_part_missing() {
        let req = PredictionRequest {
            bathrooms_half: None,
            ..request()
        };
        assert_eq!(req.bathrooms(), None);
        assert_eq!(req.summary()[2].1, "-");
    }

    #[test]
    fn band_is_five_percent_each_side() {
        let band = PredictionResult {
            predicted_price: 450_000.0,
        }
        .band();
        assert!((band.low - 427_500.0).abs() < 1e-6);
        assert!((band.high - 472_500.0).abs() < 1e-6);
    }

    #[test]
    fn band_brackets_non_negative_prices() {
        for price in [0.0, 1.0, 99_999.99, 1.5e7] {
            let band = ConfidenceBand::around(price);
            assert!(band.low <= price && price <= band.high, "price {price}");
        }
    }

    #[test]
    fn decodes_price_response() {
        let result: PredictionResult =
            serde_json::from_value(json!({ "predicted_price": 450_000 })).unwrap();
        assert_eq!(result.predicted_price, 450_000.0);
    }
}
