//! Upload text extraction — PDFs via `pdf-extract`, plain text with a
//! Latin-1 fallback for files that are not valid UTF-8.

use crate::errors::AppError;

/// Extracts the text of an uploaded resume or job description.
///
/// `is_pdf` comes from the upload's content type or file extension; anything
/// that is not a PDF is treated as plain text. A malformed PDF surfaces as
/// `AppError::Extraction` so the user can re-export and resubmit.
pub fn extract_text(bytes: &[u8], is_pdf: bool) -> Result<String, AppError> {
    let text = if is_pdf {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Extraction(format!("Could not read PDF: {e}")))?
    } else {
        decode_plain_text(bytes)
    };
    Ok(text.trim().to_string())
}

/// Decodes text bytes as UTF-8, falling back to Latin-1 (a total decoding —
/// every byte maps to a char, so this never fails).
fn decode_plain_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// True when an upload should go through the PDF extractor, judged by the
/// declared content type first and the filename extension second.
pub fn looks_like_pdf(content_type: Option<&str>, filename: Option<&str>) -> bool {
    if content_type == Some("application/pdf") {
        return true;
    }
    filename
        .map(|name| name.to_ascii_lowercase().ends_with(".pdf"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_utf8() {
        let text = extract_text("5 years Python backend experience".as_bytes(), false).unwrap();
        assert_eq!(text, "5 years Python backend experience");
    }

    #[test]
    fn test_plain_text_trims_whitespace() {
        let text = extract_text(b"  resume body \n", false).unwrap();
        assert_eq!(text, "resume body");
    }

    #[test]
    fn test_latin1_fallback_never_fails() {
        // 0xE9 is 'é' in Latin-1 and invalid as a standalone UTF-8 byte.
        let text = extract_text(&[b'r', 0xE9, b's', b'u', b'm', 0xE9], false).unwrap();
        assert_eq!(text, "résumé");
    }

    #[test]
    fn test_malformed_pdf_is_extraction_error() {
        let err = extract_text(b"not a pdf at all", true).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_pdf_detection_by_content_type() {
        assert!(looks_like_pdf(Some("application/pdf"), None));
        assert!(!looks_like_pdf(Some("text/plain"), Some("resume.txt")));
    }

    #[test]
    fn test_pdf_detection_by_extension() {
        assert!(looks_like_pdf(None, Some("Resume.PDF")));
        assert!(!looks_like_pdf(None, Some("resume.txt")));
        assert!(!looks_like_pdf(None, None));
    }
}
