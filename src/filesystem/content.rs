use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use derive_more::Display;

/// Standard alphabet, lenient about padding and trailing bits so that any
/// structurally valid payload is recognized.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// How a file payload was recognized when it was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Encoding {
    #[display("text")]
    PlainText,
    #[display("base64")]
    Base64,
}

/// Payload of a file node.
///
/// The stored text is kept verbatim. Whether it is base64 is decided purely
/// structurally, so ordinary words drawn from the base64 alphabet with a
/// suitable length (`cafe`, `deadbeef`) are treated as encoded too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    raw: String,
    encoding: Encoding,
}

impl Content {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let encoding = if !raw.is_empty() && PAYLOAD_ENGINE.decode(&raw).is_ok() {
            Encoding::Base64
        } else {
            Encoding::PlainText
        };
        Self { raw, encoding }
    }

    /// The stored text, unchanged.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn is_encoded(&self) -> bool {
        self.encoding == Encoding::Base64
    }

    /// Decoded text for base64 payloads, the stored text otherwise.
    /// Decoded bytes that are not valid UTF-8 are converted lossily.
    pub fn as_text(&self) -> String {
        match self.encoding {
            Encoding::PlainText => self.raw.clone(),
            Encoding::Base64 => match PAYLOAD_ENGINE.decode(&self.raw) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(_) => self.raw.clone(),
            },
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::new(String::new())
    }
}
