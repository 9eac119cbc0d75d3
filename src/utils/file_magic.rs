/// Checks that upload content matches its claimed extension (with the dot, e.g. `.xlsx`)
///
/// OOXML files are ZIP containers. CSV has no signature, so only binary
/// content is refused for it.
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        ".xlsx" | ".docx" => data.starts_with(&[0x50, 0x4B, 0x03, 0x04]),
        ".csv" => {
            let head = &data[..data.len().min(1024)];
            !head.contains(&0) && !data.starts_with(&[0x50, 0x4B, 0x03, 0x04])
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ooxml_requires_zip_signature() {
        assert!(validate_magic_bytes(&[0x50, 0x4B, 0x03, 0x04, 0x14], ".xlsx"));
        assert!(validate_magic_bytes(&[0x50, 0x4B, 0x03, 0x04], ".DOCX"));
        assert!(!validate_magic_bytes(b"first_name,last_name", ".xlsx"));
    }

    #[test]
    fn csv_must_be_text() {
        assert!(validate_magic_bytes(b"first_name,last_name\nAna,Lopez", ".csv"));
        assert!(!validate_magic_bytes(&[0x50, 0x4B, 0x03, 0x04], ".csv"));
        assert!(!validate_magic_bytes(&[0x41, 0x00, 0x42], ".csv"));
        assert!(!validate_magic_bytes(b"", ".csv"));
    }
}
