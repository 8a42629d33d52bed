//! Loading the descriptor bytes from the command line or a file.

use crate::cli::InputArgs;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use ntsd::{Marshal, SecurityDescriptor};

/// How the input bytes are encoded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Hex,
    Base64,
    Raw,
}

impl InputArgs {
    /// Loads and decodes the descriptor bytes.
    pub fn load(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        let data = if self.file {
            log::debug!("Reading descriptor from {}", self.input);
            decode(&std::fs::read(&self.input)?, InputFormat::Raw)?
        } else if self.base64 {
            decode(self.input.as_bytes(), InputFormat::Base64)?
        } else {
            decode(self.input.as_bytes(), InputFormat::Hex)?
        };
        log::debug!("Loaded {} descriptor bytes", data.len());
        Ok(data)
    }
}

/// Parses a self-relative descriptor from the front of `data`.
pub fn parse_descriptor(data: &[u8]) -> ntsd::Result<SecurityDescriptor> {
    let (sd, consumed) = SecurityDescriptor::unmarshal(data).inspect_err(|e| {
        log::error!("Failed to parse security descriptor: {e}");
    })?;
    if consumed < data.len() {
        log::warn!(
            "Ignoring {} trailing bytes after the descriptor",
            data.len() - consumed
        );
    }
    Ok(sd)
}

/// Decodes `raw` according to `format`.
pub fn decode(raw: &[u8], format: InputFormat) -> Result<Vec<u8>, String> {
    let compact = || -> Result<String, String> {
        let text = std::str::from_utf8(raw).map_err(|e| format!("Input is not text: {e}"))?;
        Ok(text.chars().filter(|c| !c.is_whitespace()).collect())
    };

    match format {
        InputFormat::Raw => Ok(raw.to_vec()),
        InputFormat::Hex => {
            let text = compact()?;
            let digits = text
                .strip_prefix("0x")
                .or_else(|| text.strip_prefix("0X"))
                .unwrap_or(&text);
            hex::decode(digits).map_err(|e| format!("Invalid hex input: {e}"))
        }
        InputFormat::Base64 => STANDARD
            .decode(compact()?)
            .map_err(|e| format!("Invalid base64 input: {e}")),
    }
}
