//! File text extraction for the supported document formats.

use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Why a document could not be turned into text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("{0}")]
    Unreadable(String),
}

impl From<LoadError> for clausewatch_core::Error {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::NotFound(p) => clausewatch_core::Error::NotFound(p),
            LoadError::UnsupportedType(t) => clausewatch_core::Error::UnsupportedType(t),
            LoadError::Unreadable(m) => clausewatch_core::Error::Unreadable(m),
        }
    }
}

/// Supported file types for text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    PlainText,
    Markdown,
    Docx,
    Pdf,
    Unknown,
}

impl FileType {
    /// Detect file type from extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" | "text" => Self::PlainText,
            "md" | "markdown" => Self::Markdown,
            "docx" => Self::Docx,
            "pdf" => Self::Pdf,
            _ => Self::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }
}

/// Extract trimmed text from a document on disk.
pub fn extract_text(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.display().to_string()));
    }

    let text = match FileType::from_path(path) {
        FileType::PlainText | FileType::Markdown => std::fs::read_to_string(path)
            .map_err(|e| LoadError::Unreadable(format!("Text read failed: {}", e)))?,
        FileType::Docx => extract_docx(path)?,
        FileType::Pdf => pdf_extract::extract_text(path)
            .map_err(|e| LoadError::Unreadable(format!("PDF read failed: {}", e)))?,
        FileType::Unknown => {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| format!(".{}", e))
                .unwrap_or_else(|| "(no extension)".to_string());
            return Err(LoadError::UnsupportedType(ext));
        }
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(LoadError::Unreadable(
            "File contains no readable text (possibly scanned or image-based document)".into(),
        ));
    }

    Ok(text.to_string())
}

/// DOCX is a zip archive; body text lives in `word/document.xml`.
fn extract_docx(path: &Path) -> Result<String, LoadError> {
    let unreadable = |e: &dyn std::fmt::Display| LoadError::Unreadable(format!("DOCX read failed: {}", e));

    let file = std::fs::File::open(path).map_err(|e| unreadable(&e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| unreadable(&e))?;
    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|e| unreadable(&e))?;

    let mut xml = String::new();
    entry.read_to_string(&mut xml).map_err(|e| unreadable(&e))?;

    Ok(docx_xml_to_text(&xml))
}

static DOCX_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|</w:p>|<w:tab/>|<w:br/>").unwrap()
});

/// Flatten WordprocessingML into text: one line per paragraph (table cells
/// included), blank paragraphs dropped.
pub fn docx_xml_to_text(xml: &str) -> String {
    let mut out = String::new();

    for caps in DOCX_TOKEN_RE.captures_iter(xml) {
        match caps.get(1) {
            Some(run) => out.push_str(&unescape_xml(run.as_str())),
            None => match &caps[0] {
                "<w:tab/>" => out.push('\t'),
                _ => out.push('\n'),
            },
        }
    }

    out.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_docx(path: &Path, document_xml: &str) {
        let file = std::fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_file_type_detection() {
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("docx"), FileType::Docx);
        assert_eq!(FileType::from_extension("md"), FileType::Markdown);
        assert_eq!(FileType::from_extension("txt"), FileType::PlainText);
        assert_eq!(FileType::from_extension("exe"), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("noext")), FileType::Unknown);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = extract_text(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.xlsx");
        std::fs::write(&path, b"whatever").unwrap();
        let err = extract_text(&path).unwrap_err();
        assert_eq!(err, LoadError::UnsupportedType(".xlsx".into()));
    }

    #[test]
    fn test_plain_text_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.txt");
        std::fs::write(&path, "\n\n  Retention policy applies.  \n").unwrap();
        assert_eq!(extract_text(&path).unwrap(), "Retention policy applies.");
    }

    #[test]
    fn test_blank_text_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.md");
        std::fs::write(&path, "   \n\t").unwrap();
        assert!(matches!(extract_text(&path), Err(LoadError::Unreadable(_))));
    }

    #[test]
    fn test_docx_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contract.docx");
        let xml = r#"<?xml version="1.0"?><w:document><w:body>
            <w:p><w:r><w:t>This contract</w:t></w:r><w:r><w:t xml:space="preserve"> contains a secret clause.</w:t></w:r></w:p>
            <w:p></w:p>
            <w:tbl><w:tr><w:tc><w:p><w:r><w:t>Fees &amp; penalties</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
        </w:body></w:document>"#;
        write_docx(&path, xml);

        let text = extract_text(&path).unwrap();
        assert_eq!(text, "This contract contains a secret clause.\nFees & penalties");
    }

    #[test]
    fn test_corrupt_docx_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"not a zip").unwrap();
        assert!(matches!(extract_text(&path), Err(LoadError::Unreadable(_))));
    }

    #[test]
    fn test_docx_tabs_and_breaks() {
        let xml = "<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t></w:r></w:p>";
        assert_eq!(docx_xml_to_text(xml), "A\tB\nC");
    }
}
