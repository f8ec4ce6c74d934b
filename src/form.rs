use crate::model::PredictionRequest;

/// Raw text of the four form fields, exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub bathrooms_full: String,
    pub bathrooms_half: String,
    pub bedrooms_total: String,
    pub living_area: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    BathroomsFull,
    BathroomsHalf,
    BedroomsTotal,
    LivingArea,
}

impl Field {
    pub const ALL: [Self; 4] = [
        Self::BathroomsFull,
        Self::BathroomsHalf,
        Self::BedroomsTotal,
        Self::LivingArea,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::BathroomsFull => "Full bathrooms",
            Self::BathroomsHalf => "Half bathrooms",
            Self::BedroomsTotal => "Bedrooms",
            Self::LivingArea => "Living area (sq ft)",
        }
    }
}

impl FormInput {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::BathroomsFull => &self.bathrooms_full,
            Field::BathroomsHalf => &self.bathrooms_half,
            Field::BedroomsTotal => &self.bedrooms_total,
            Field::LivingArea => &self.living_area,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::BathroomsFull => &mut self.bathrooms_full,
            Field::BathroomsHalf => &mut self.bathrooms_half,
            Field::BedroomsTotal => &mut self.bedrooms_total,
            Field::LivingArea => &mut self.living_area,
        };
        *slot = value.into();
    }

    /// Reads the current field values into a new request. Nothing is cached
    /// between calls.
    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            bathrooms_full: parse_int(&self.bathrooms_full),
            bathrooms_half: parse_int(&self.bathrooms_half),
            bedrooms_total: parse_int(&self.bedrooms_total),
            living_area: parse_float(&self.living_area),
        }
    }
}

/// Leading-integer parse: skips leading whitespace, accepts an optional sign,
/// then takes as many decimal digits as follow. `"2.5"` reads as `2`,
/// `"3 beds"` as `3`; text without leading digits is `None`.
pub fn parse_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    trimmed[..sign_len + digits_len].parse::<i64>().ok()
}

/// Leading-decimal parse: the longest prefix that reads as a finite decimal
/// number, with an optional fraction and exponent.
pub fn parse_float(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = usize::from(trimmed.starts_with(['+', '-']));

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
