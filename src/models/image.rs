use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raw image payload owned by an event.
///
/// Held as bytes in memory; JSON documents carry it as standard base64 text.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData(Vec<u8>);

impl ImageData {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Decode plain base64 or a `data:<mime>;base64,<payload>` URL.
    pub fn from_base64(text: &str) -> Result<Self, base64::DecodeError> {
        let text = text.trim();
        let payload = match text.split_once(";base64,") {
            Some((head, rest)) if head.starts_with("data:") => rest,
            _ => text,
        };
        STANDARD.decode(payload).map(Self)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// File extension guessed from the magic bytes; unknown payloads are
    /// stored as `png`.
    pub fn extension(&self) -> &'static str {
        let b = self.0.as_slice();
        if b.starts_with(&[0x89, b'P', b'N', b'G']) {
            "png"
        } else if b.starts_with(&[0xFF, 0xD8, 0xFF]) {
            "jpg"
        } else if b.starts_with(b"GIF87a") || b.starts_with(b"GIF89a") {
            "gif"
        } else if b.len() >= 12 && &b[0..4] == b"RIFF" && &b[8..12] == b"WEBP" {
            "webp"
        } else if b.starts_with(b"BM") {
            "bmp"
        } else {
            "png"
        }
    }
}

impl std::fmt::Debug for ImageData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ImageData({} bytes, {})", self.0.len(), self.extension())
    }
}

impl Serialize for ImageData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for ImageData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        ImageData::from_base64(&text).map_err(serde::de::Error::custom)
    }
}
