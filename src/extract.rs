use std::fs;
use std::path::Path;

use tracing::warn;

/// Resolves a resume identifier to its raw text. `None` means the text could
/// not be obtained; the reason is logged, never returned.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, path: &Path) -> Option<String>;
}

/// Reads `.txt` and `.pdf` resumes from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTextExtractor;

impl FileTextExtractor {
    fn read_txt(path: &Path) -> Option<String> {
        match fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Error reading text file {}: {e}", path.display());
                None
            }
        }
    }

    fn read_pdf(path: &Path) -> Option<String> {
        match pdf_extract::extract_text(path) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Error extracting text from PDF {}: {e}", path.display());
                None
            }
        }
    }
}

impl TextExtractor for FileTextExtractor {
    fn extract_text(&self, path: &Path) -> Option<String> {
        if !path.exists() {
            warn!("File not found: {}", path.display());
            return None;
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        let text = match extension.as_deref() {
            Some("txt") => Self::read_txt(path),
            Some("pdf") => Self::read_pdf(path),
            _ => {
                warn!("Unsupported file format: {}", path.display());
                None
            }
        }?;

        let text = text.trim();
        if text.is_empty() {
            warn!("No text found in {}", path.display());
            return None;
        }
        Some(text.to_string())
    }
}

pub fn is_supported_resume(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_lowercase().as_str(), "txt" | "pdf"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_and_trims_txt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.TXT");
        fs::write(&path, "\n  Rust engineer  \n").unwrap();
        assert_eq!(
            FileTextExtractor.extract_text(&path).as_deref(),
            Some("Rust engineer")
        );
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(FileTextExtractor.extract_text(&dir.path().join("gone.txt")), None);
    }

    #[test]
    fn test_unsupported_extension_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        fs::write(&path, "content").unwrap();
        assert_eq!(FileTextExtractor.extract_text(&path), None);
    }

    #[test]
    fn test_blank_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        fs::write(&path, "   \n\t").unwrap();
        assert_eq!(FileTextExtractor.extract_text(&path), None);
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_resume(Path::new("a/b/cv.pdf")));
        assert!(is_supported_resume(Path::new("cv.Txt")));
        assert!(!is_supported_resume(Path::new("cv.md")));
        assert!(!is_supported_resume(Path::new("cv")));
    }
}
