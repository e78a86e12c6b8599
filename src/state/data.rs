/// Shared data structures for the application state
///
/// These types represent the images that flow between
/// the intake widgets, the workflow controller and the UI layer.
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use iced::widget::image::Handle;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Which of the two required images a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    /// The personal photo the outfit is applied to
    Source,
    /// The outfit to try on
    Outfit,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 2] = [ImageSlot::Source, ImageSlot::Outfit];

    /// Human-readable label shown above the intake widget
    pub fn label(self) -> &'static str {
        match self {
            ImageSlot::Source => "Your Photo",
            ImageSlot::Outfit => "Outfit Image",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUrlError {
    #[error("not a data URL")]
    NotDataUrl,
    #[error("data URL is not base64 encoded")]
    NotBase64,
    #[error("data URL has no content type")]
    MissingMime,
    #[error("data URL content type {0} is not an image")]
    NotImage(String),
    #[error("data URL has an empty payload")]
    EmptyPayload,
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// A self-contained `data:<mime>;base64,<payload>` image string
///
/// Cloning is cheap, the text is shared.
#[derive(Clone, PartialEq, Eq)]
pub struct DataUrl(Arc<str>);

impl DataUrl {
    /// Encode raw bytes under the given content type
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        let text = format!("data:{mime};base64,{}", BASE64.encode(bytes));
        DataUrl(text.into())
    }

    /// Validate an existing data URL (e.g. one returned by the generator)
    pub fn parse(text: &str) -> Result<Self, DataUrlError> {
        let trimmed = text.trim();
        let rest = trimmed.strip_prefix("data:").ok_or(DataUrlError::NotDataUrl)?;
        let (meta, payload) = rest.split_once(',').ok_or(DataUrlError::NotDataUrl)?;

        if !meta.ends_with(";base64") {
            return Err(DataUrlError::NotBase64);
        }
        let mime = meta.split(';').next().unwrap_or_default().trim();
        if mime.is_empty() {
            return Err(DataUrlError::MissingMime);
        }
        if !mime.to_ascii_lowercase().starts_with("image/") {
            return Err(DataUrlError::NotImage(mime.to_string()));
        }
        if payload.trim().is_empty() {
            return Err(DataUrlError::EmptyPayload);
        }

        Ok(DataUrl(trimmed.into()))
    }

    /// The declared content type, e.g. `image/png`
    pub fn mime(&self) -> &str {
        self.meta().split(';').next().unwrap_or_default()
    }

    /// Decode the base64 payload back into the original bytes
    pub fn decode(&self) -> Result<Vec<u8>, DataUrlError> {
        BASE64
            .decode(self.payload().trim().as_bytes())
            .map_err(|e| DataUrlError::InvalidBase64(e.to_string()))
    }

    /// Length of the encoded text in bytes
    pub fn encoded_len(&self) -> usize {
        self.0.len()
    }

    fn meta(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .map(|(meta, _)| meta)
            .unwrap_or_default()
    }

    fn payload(&self) -> &str {
        self.0
            .split_once(',')
            .map(|(_, payload)| payload)
            .unwrap_or_default()
    }
}

// Payloads can be megabytes; never dump them into logs.
impl fmt::Debug for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataUrl")
            .field("mime", &self.mime())
            .field("len", &self.encoded_len())
            .finish()
    }
}

impl Serialize for DataUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A selected (or generated) image: the embeddable string plus
/// a preview handle built from it once, at intake time.
#[derive(Debug, Clone)]
pub struct ImageValue {
    url: DataUrl,
    preview: Handle,
}

impl ImageValue {
    pub fn from_data_url(url: DataUrl) -> Result<Self, DataUrlError> {
        let bytes = url.decode()?;
        if bytes.is_empty() {
            return Err(DataUrlError::EmptyPayload);
        }
        Ok(Self {
            preview: Handle::from_bytes(bytes),
            url,
        })
    }

    pub fn url(&self) -> &DataUrl {
        &self.url
    }

    pub fn preview(&self) -> &Handle {
        &self.preview
    }
}

impl PartialEq for ImageValue {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_produces_embeddable_string() {
        let url = DataUrl::encode("image/png", b"hello");
        assert_eq!(url, DataUrl::parse("data:image/png;base64,aGVsbG8=").unwrap());
        assert_eq!(url.encoded_len(), "data:image/png;base64,aGVsbG8=".len());
        assert_eq!(url.mime(), "image/png");
        assert_eq!(url.decode().unwrap(), b"hello");
    }

    #[test]
    fn test_parse_accepts_parameters_before_base64() {
        let url = DataUrl::parse("data:image/jpeg;name=x.jpg;base64,AAAA").unwrap();
        assert_eq!(url.mime(), "image/jpeg");
    }

    #[test]
    fn test_parse_rejects_non_data_urls() {
        assert_eq!(
            DataUrl::parse("https://example.com/a.png"),
            Err(DataUrlError::NotDataUrl)
        );
        assert_eq!(DataUrl::parse("data:image/png,AAAA"), Err(DataUrlError::NotBase64));
        assert_eq!(DataUrl::parse("data:;base64,AAAA"), Err(DataUrlError::MissingMime));
        assert_eq!(DataUrl::parse("data:image/png;base64,"), Err(DataUrlError::EmptyPayload));
    }

    #[test]
    fn test_parse_rejects_non_image_content() {
        assert_eq!(
            DataUrl::parse("data:text/plain;base64,aGVsbG8="),
            Err(DataUrlError::NotImage("text/plain".to_string()))
        );
        assert_eq!(
            DataUrl::parse("data:application/json;base64,e30="),
            Err(DataUrlError::NotImage("application/json".to_string()))
        );
        assert!(DataUrl::parse("data:IMAGE/PNG;base64,AAAA").is_ok());
    }

    #[test]
    fn test_decode_reports_bad_payload() {
        let url = DataUrl::parse("data:image/png;base64,@@@@").unwrap();
        assert!(matches!(url.decode(), Err(DataUrlError::InvalidBase64(_))));
    }

    #[test]
    fn test_debug_hides_payload() {
        let url = DataUrl::encode("image/png", &[7u8; 64]);
        let printed = format!("{url:?}");
        assert!(printed.contains("image/png"));
        assert!(!printed.contains("base64,"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let url = DataUrl::encode("image/gif", b"x");
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, "\"data:image/gif;base64,eA==\"");
    }

    #[test]
    fn test_image_value_requires_payload_bytes() {
        let url = DataUrl::encode("image/png", b"png-bytes");
        let value = ImageValue::from_data_url(url.clone()).unwrap();
        assert_eq!(value.url(), &url);
    }

    #[test]
    fn test_slot_labels() {
        assert_eq!(ImageSlot::Source.label(), "Your Photo");
        assert_eq!(ImageSlot::Outfit.label(), "Outfit Image");
    }
}
