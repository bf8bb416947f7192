//! Photo ingestion collaborator contract.
//!
//! The core stores photo references verbatim and never interprets bytes.
//! The shipped implementation embeds the image as a `data:` URL, matching
//! what the original browser pipeline produced.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Turns raw image bytes into a stable string reference.
pub trait PhotoIngestor: Send + Sync {
    fn ingest(&self, bytes: &[u8], content_type: &str) -> String;
}

/// Embeds the bytes as a base64 `data:` URL.
#[derive(Debug, Default)]
pub struct DataUrlIngestor;

impl PhotoIngestor for DataUrlIngestor {
    fn ingest(&self, bytes: &[u8], content_type: &str) -> String {
        format!("data:{content_type};base64,{}", STANDARD.encode(bytes))
    }
}
