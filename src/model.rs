use serde::{Deserialize, Deserializer, Serialize};

/// Nullable datastore columns arrive as `null`; treat them like missing fields.
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    /// Blank text is absent; text that is not a number becomes NaN so the
    /// render of that one trip fails instead of the whole input.
    fn into_number(self) -> Option<f64> {
        match self {
            NumberOrText::Number(n) => Some(n),
            NumberOrText::Text(s) if s.trim().is_empty() => None,
            NumberOrText::Text(s) => Some(s.trim().parse().unwrap_or(f64::NAN)),
        }
    }
}

/// Km and toll columns: a number, a numeric string, blank or `null` (0).
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrText>::deserialize(deserializer)
        .map(|v| v.and_then(NumberOrText::into_number).unwrap_or(0.0))
}

fn lenient_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrText>::deserialize(deserializer).map(|v| v.and_then(NumberOrText::into_number))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// One submitted trip. Every field is optional on input; the service layer
/// may hand over partially filled or stale rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TripRecord {
    /// Free-text booking code, may be empty.
    #[serde(deserialize_with = "null_to_default")]
    pub id: String,
    #[serde(deserialize_with = "null_to_default")]
    pub company_name: String,
    #[serde(deserialize_with = "null_to_default")]
    pub booked_by: String,
    #[serde(deserialize_with = "null_to_default")]
    pub report_to: String,
    #[serde(deserialize_with = "null_to_default")]
    pub vehicle_reg_no: String,
    #[serde(deserialize_with = "null_to_default")]
    pub car_type: String,
    /// "Local" / "Outstation", or legacy "One way" / "Round Trip". Printed verbatim.
    #[serde(deserialize_with = "null_to_default")]
    pub trip_type: String,
    #[serde(deserialize_with = "null_to_default")]
    pub source: String,
    #[serde(deserialize_with = "null_to_default")]
    pub destination: String,
    #[serde(deserialize_with = "lenient_number")]
    pub start_km: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub end_km: f64,
    /// Admin correction added to the closing reading after submission.
    #[serde(deserialize_with = "lenient_optional_number")]
    pub additional_km: Option<f64>,
    /// Distance cached upstream when the trip was submitted. Not printed:
    /// it goes stale as soon as `additional_km` is edited.
    #[serde(deserialize_with = "lenient_optional_number")]
    pub total_km: Option<f64>,
    #[serde(deserialize_with = "null_to_default")]
    pub start_date_time: String,
    #[serde(deserialize_with = "null_to_default")]
    pub end_date_time: String,
    #[serde(deserialize_with = "null_to_default")]
    pub total_time: String,
    #[serde(deserialize_with = "lenient_number")]
    pub toll_parking: f64,
    /// `data:image/...;base64,` signature captured on the driver's device.
    pub signature: Option<String>,
    #[serde(deserialize_with = "null_to_default")]
    pub timestamp: String,
}

impl TripRecord {
    /// Closing odometer as printed: end reading plus the admin adjustment.
    pub fn adjusted_end_km(&self) -> f64 {
        self.end_km + self.additional_km.unwrap_or(0.0)
    }

    /// Distance as printed, always recomputed from the raw readings.
    pub fn printed_distance_km(&self) -> f64 {
        self.adjusted_end_km() - self.start_km
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgencySettings {
    #[serde(deserialize_with = "null_to_default")]
    pub agency_name: String,
    #[serde(deserialize_with = "null_to_default")]
    pub address_line1: String,
    #[serde(deserialize_with = "null_to_default")]
    pub address_line2: String,
    #[serde(deserialize_with = "null_to_default")]
    pub contact_number: String,
    #[serde(deserialize_with = "null_to_default")]
    pub email: String,
    pub logo_base64: Option<String>,
}

impl Default for AgencySettings {
    fn default() -> Self {
        Self {
            agency_name: "Vista Travels".into(),
            address_line1: "No. 51, Brodies Road, Karayanchavadi,".into(),
            address_line2: "Poonamallee, Chennai - 600056".into(),
            contact_number: "+91 98400 12345".into(),
            email: "bookings@vistatravels.com".into(),
            logo_base64: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// A decoded data-URI raster, ready to become an image XObject.
#[derive(Clone, Debug)]
pub struct EmbeddedImage {
    /// JPEG: the original DCT stream. PNG: zlib-compressed RGB samples.
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// JPEG colour components (1 gray, 3 RGB, 4 CMYK). Always 3 for PNG.
    pub components: u8,
    /// Zlib-compressed alpha channel for PNGs with transparency.
    pub alpha: Option<Vec<u8>>,
}

impl EmbeddedImage {
    pub fn aspect_ratio(&self) -> f32 {
        self.pixel_height as f32 / self.pixel_width.max(1) as f32
    }
}
