use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use serde::Deserialize;

/// One entry of a contents-listing response.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ContentEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: String,
}

impl ContentEntry {
    pub fn is_dir(&self) -> bool {
        self.entry_type == "dir"
    }
}

/// A single file fetched through the contents API.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ContentFile {
    pub content: Option<String>,
    pub encoding: Option<String>,
}

impl ContentFile {
    /// Decode the transfer-encoded payload to text.
    ///
    /// Returns None when the content is missing or is not valid
    /// base64/UTF-8; an undecodable descriptor is a normal condition, not
    /// an error.
    pub fn decode_text(&self) -> Option<String> {
        let content = self.content.as_deref()?;
        match self.encoding.as_deref() {
            Some("base64") => {
                // The API wraps base64 payloads with newlines.
                let stripped: String = content.chars().filter(|c| !c.is_whitespace()).collect();
                let bytes = BASE64_STANDARD.decode(stripped).ok()?;
                String::from_utf8(bytes).ok()
            }
            _ => Some(content.to_string()),
        }
    }
}
