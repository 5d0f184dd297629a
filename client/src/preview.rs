//! Rendering a chosen local file into an inline `data:` URL, the same shape
//! the gallery stores for uploaded images.

use std::io;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Read a file and encode it as `data:<mime>;base64,<payload>`.
pub async fn data_url_from_file(path: &Path) -> io::Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(format!(
        "data:{};base64,{}",
        mime_from_extension(path),
        STANDARD.encode(bytes)
    ))
}

/// Derive a MIME type from the file extension.
fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension(&PathBuf::from("a.PNG")), "image/png");
        assert_eq!(mime_from_extension(&PathBuf::from("a.jpeg")), "image/jpeg");
        assert_eq!(
            mime_from_extension(&PathBuf::from("a.bin")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_data_url_roundtrip() {
        let dir = std::env::temp_dir().join(format!("keepsake_dataurl_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("img.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let url = data_url_from_file(&path).await.unwrap();
        assert_eq!(url, format!("data:image/gif;base64,{}", STANDARD.encode(b"GIF89a")));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
