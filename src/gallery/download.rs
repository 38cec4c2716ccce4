// SPDX-License-Identifier: MPL-2.0
//! Image download: byte fetching, deterministic filenames, batch saving.
//!
//! Filenames follow `{sanitized-title}_{position}.{ext}` with a 1-based
//! position. The extension is sniffed from the fetched bytes, falling back
//! to the locator's own extension and finally to `jpg`.

use super::session::ImageLocator;
use crate::error::{Error, Result};
use futures_util::StreamExt;
use std::path::{Path, PathBuf};

const USER_AGENT: &str = concat!("IcedGallery/", env!("CARGO_PKG_VERSION"));

/// Filename stem used when the gallery has no title.
const UNTITLED_STEM: &str = "image";

/// Characters that never appear in a generated filename.
const FORBIDDEN: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Turns a gallery title into a filename stem: whitespace becomes
/// underscores, path-hostile characters are dropped.
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    let sanitized: String = title
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if FORBIDDEN.contains(&c) {
                None
            } else {
                Some(c)
            }
        })
        .collect();
    if sanitized.is_empty() {
        UNTITLED_STEM.to_string()
    } else {
        sanitized
    }
}

/// Deterministic download filename for the image at `position` (1-based).
#[must_use]
pub fn download_filename(title: Option<&str>, position: usize, ext: &str) -> String {
    let stem = title.map_or_else(|| UNTITLED_STEM.to_string(), sanitize_title);
    format!("{stem}_{position}.{ext}")
}

/// Picks a file extension for fetched bytes: sniffed image format first,
/// then the locator's extension, then `jpg` (the format the storefront
/// uploads in practice).
#[must_use]
pub fn guess_extension(bytes: &[u8], locator: &ImageLocator) -> String {
    if let Ok(format) = image_rs::guess_format(bytes) {
        if let Some(ext) = format.extensions_str().first() {
            let ext = if *ext == "jpeg" { "jpg" } else { ext };
            return ext.to_string();
        }
    }
    locator.extension().unwrap_or_else(|| "jpg".to_string())
}

/// Fetches the raw bytes behind a locator.
///
/// Remote fetches stream the response body; a non-2xx status is an error.
/// Local locators read from disk so file-based galleries work offline.
pub async fn fetch_bytes(locator: &ImageLocator) -> Result<Vec<u8>> {
    match locator {
        ImageLocator::Remote(url) => {
            let client = reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::limited(10))
                .user_agent(USER_AGENT)
                .build()?;

            let response = client.get(url).send().await?;
            if !response.status().is_success() {
                return Err(Error::Http(format!(
                    "HTTP status {} for {url}",
                    response.status()
                )));
            }

            let mut bytes = Vec::with_capacity(
                usize::try_from(response.content_length().unwrap_or(0)).unwrap_or(0),
            );
            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                bytes.extend_from_slice(&chunk?);
            }
            Ok(bytes)
        }
        ImageLocator::Local(path) => Ok(std::fs::read(path)?),
    }
}

/// Writes fetched bytes to `path`, creating parent directories as needed.
pub fn save_bytes(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Result of a batch download. Every image is attempted independently; a
/// failure on one never aborts the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Filenames written, in index order.
    pub saved: Vec<String>,
    /// Display names of the locators that failed.
    pub failed: Vec<String>,
}

impl BatchOutcome {
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Downloads every image of a gallery into `dir`, sequentially and in index
/// order, naming each file `{sanitized-title}_{position}.{ext}`.
pub async fn download_all(
    images: &[ImageLocator],
    title: Option<&str>,
    dir: &Path,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for (index, locator) in images.iter().enumerate() {
        match fetch_bytes(locator).await {
            Ok(bytes) => {
                let ext = guess_extension(&bytes, locator);
                let filename = download_filename(title, index + 1, &ext);
                match save_bytes(&bytes, &dir.join(&filename)) {
                    Ok(()) => outcome.saved.push(filename),
                    Err(_) => outcome.failed.push(locator.to_string()),
                }
            }
            Err(_) => outcome.failed.push(locator.to_string()),
        }
    }

    outcome
}

/// Fetches one image and writes it to an explicit destination path, as
/// chosen by the save dialog. Returns the final filename.
pub async fn download_to(locator: &ImageLocator, destination: PathBuf) -> Result<String> {
    let bytes = fetch_bytes(locator).await?;
    save_bytes(&bytes, &destination)?;
    Ok(destination
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn sanitize_replaces_spaces_with_underscores() {
        assert_eq!(sanitize_title("Boiler X"), "Boiler_X");
        assert_eq!(sanitize_title("Котёл 24 кВт"), "Котёл_24_кВт");
    }

    #[test]
    fn sanitize_drops_path_hostile_characters() {
        assert_eq!(sanitize_title("a/b\\c:d?e"), "abcde");
    }

    #[test]
    fn sanitize_of_empty_title_falls_back() {
        assert_eq!(sanitize_title(""), "image");
        assert_eq!(sanitize_title("///"), "image");
    }

    #[test]
    fn filename_is_deterministic_and_one_based() {
        // 0-based index 2 -> position 3
        assert_eq!(
            download_filename(Some("Boiler X"), 3, "jpg"),
            "Boiler_X_3.jpg"
        );
    }

    #[test]
    fn filename_without_title_uses_fallback_stem() {
        assert_eq!(download_filename(None, 1, "png"), "image_1.png");
    }

    #[test]
    fn guess_extension_sniffs_png_bytes() {
        let locator = ImageLocator::parse("https://img.example/pic.jpg");
        assert_eq!(guess_extension(PNG_MAGIC, &locator), "png");
    }

    #[test]
    fn guess_extension_falls_back_to_locator() {
        let locator = ImageLocator::parse("https://img.example/pic.webp?w=800");
        assert_eq!(guess_extension(b"not an image", &locator), "webp");
    }

    #[test]
    fn guess_extension_defaults_to_jpg() {
        let locator = ImageLocator::parse("https://img.example/pic");
        assert_eq!(guess_extension(b"not an image", &locator), "jpg");
    }

    #[tokio::test]
    async fn fetch_bytes_reads_local_files() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("a.png");
        std::fs::write(&path, PNG_MAGIC).unwrap();

        let bytes = fetch_bytes(&ImageLocator::Local(path)).await.unwrap();
        assert_eq!(bytes, PNG_MAGIC);
    }

    /// Serves a single canned HTTP response on an ephemeral port and
    /// returns an image URL pointing at it.
    fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 1024];
                let _ = stream.read(&mut request);
                let _ = write!(
                    stream,
                    "{status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(body);
            }
        });
        format!("http://{addr}/pic.png")
    }

    #[tokio::test]
    async fn fetch_bytes_streams_remote_body() {
        let url = serve_once("HTTP/1.1 200 OK", PNG_MAGIC);
        let bytes = fetch_bytes(&ImageLocator::Remote(url)).await.unwrap();
        assert_eq!(bytes, PNG_MAGIC);
    }

    #[tokio::test]
    async fn fetch_bytes_rejects_non_success_status() {
        let url = serve_once("HTTP/1.1 404 Not Found", b"missing");
        let result = fetch_bytes(&ImageLocator::Remote(url)).await;
        assert!(matches!(result, Err(Error::Http(_))));
    }

    #[tokio::test]
    async fn fetch_bytes_errors_on_unreachable_host() {
        // Bind and immediately drop to get a port nothing listens on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let locator = ImageLocator::Remote(format!("http://127.0.0.1:{port}/pic.png"));
        assert!(fetch_bytes(&locator).await.is_err());
    }

    #[tokio::test]
    async fn fetch_bytes_errors_on_missing_local_file() {
        let locator = ImageLocator::parse("/definitely/not/here.png");
        let result = fetch_bytes(&locator).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn download_all_continues_past_failures() {
        let src = tempdir().expect("failed to create temp dir");
        let dst = tempdir().expect("failed to create temp dir");

        let good1 = src.path().join("one.png");
        let good2 = src.path().join("two.png");
        std::fs::write(&good1, PNG_MAGIC).unwrap();
        std::fs::write(&good2, PNG_MAGIC).unwrap();

        let images = vec![
            ImageLocator::Local(good1),
            ImageLocator::Local(src.path().join("missing.png")),
            ImageLocator::Local(good2),
        ];

        let outcome = download_all(&images, Some("Boiler X"), dst.path()).await;

        assert_eq!(outcome.saved, vec!["Boiler_X_1.png", "Boiler_X_3.png"]);
        assert_eq!(outcome.failed.len(), 1);
        assert!(!outcome.is_complete_success());
        assert!(dst.path().join("Boiler_X_1.png").exists());
        assert!(dst.path().join("Boiler_X_3.png").exists());
    }

    #[tokio::test]
    async fn download_to_writes_destination_and_returns_filename() {
        let src = tempdir().expect("failed to create temp dir");
        let dst = tempdir().expect("failed to create temp dir");
        let source = src.path().join("img.png");
        std::fs::write(&source, PNG_MAGIC).unwrap();

        let filename = download_to(
            &ImageLocator::Local(source),
            dst.path().join("Boiler_X_1.png"),
        )
        .await
        .unwrap();

        assert_eq!(filename, "Boiler_X_1.png");
        assert_eq!(
            std::fs::read(dst.path().join("Boiler_X_1.png")).unwrap(),
            PNG_MAGIC
        );
    }
}
