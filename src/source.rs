//! Document text extraction

use std::fs;
use std::panic;
use std::path::Path;
use log::{debug, error, info, warn};

/// Produces plain text for a document
///
/// Implementations return an empty string instead of failing; the
/// orchestrator treats empty text as "nothing to work with".
pub trait TextSource: Send + Sync
{   fn extract_text(&self, document: &Path) -> String;
}

/// Reads PDFs through `pdf-extract` and anything else as text
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTextSource;

impl TextSource for DocumentTextSource
{   fn extract_text(&self, document: &Path) -> String
    {   info!("Extracting text from {}", document.display());
        let bytes = match fs::read(document)
        {   Ok(bytes) => bytes
          , Err(e) => {
              error!("Cannot read {}: {}", document.display(), e);
              return String::new();
            }
        };

        let text = if is_pdf(document, &bytes)
        {   extract_pdf_text(&bytes)
        } else
        {   String::from_utf8_lossy(&bytes).into_owned()
        };

        if text.trim().is_empty()
        {   warn!("No text extracted from {}", document.display());
        } else
        {   debug!(
              "Extracted {} characters from {}",
              text.chars().count(),
              document.display()
            );
        }
        text
    }
}

/// True for a `.pdf` extension or the `%PDF-` magic bytes
pub fn is_pdf(document: &Path, head: &[u8]) -> bool
{   let by_extension = document
      .extension()
      .map(|ext| ext.eq_ignore_ascii_case("pdf"))
      .unwrap_or(false);
    by_extension || head.starts_with(b"%PDF-")
}

fn extract_pdf_text(bytes: &[u8]) -> String
{   // pdf-extract can panic on malformed files
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
    {   Ok(Ok(text)) => text
      , Ok(Err(e)) => {
          error!("PDF text extraction failed: {}", e);
          String::new()
        }
      , Err(_) => {
          error!("PDF text extraction panicked");
          String::new()
        }
    }
}
