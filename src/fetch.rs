//! Retrieval of credit database documents.
//!
//! A location is either a filesystem path or a URL. `file://` URLs and plain
//! paths are read from disk; `http://` and `https://` URLs are fetched with a
//! single blocking GET. Failing to retrieve the bytes is reported as
//! `Error::Fetch`; bytes that are not UTF-8 are a `MalformedDocument`.

use std::fs;
use std::path::Path;

use url::Url;

use crate::error::{Error, Location, Result};

/// Reads the document at `location` into memory.
pub fn fetch_document(location: &str) -> Result<String> {
    match Url::parse(location) {
        // A single-letter scheme is a Windows drive letter, not a URL.
        Ok(url) if url.scheme().len() > 1 => fetch_url(location, &url),
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => read_file(location, Path::new(location)),
        Err(e) => Err(e.into()),
    }
}

fn fetch_url(location: &str, url: &Url) -> Result<String> {
    match url.scheme() {
        "file" => {
            let path = url.to_file_path().map_err(|()| fetch_error(location, "not a valid file path"))?;
            read_file(location, &path)
        }
        "http" | "https" => fetch_http(location, url),
        scheme => Err(fetch_error(
            location,
            &format!("unsupported URL scheme '{}'", scheme),
        )),
    }
}

fn read_file(location: &str, path: &Path) -> Result<String> {
    log::debug!("Reading credit database from {}", path.display());
    let bytes = fs::read(path).map_err(|e| fetch_error(location, &e.to_string()))?;
    decode(bytes)
}

fn fetch_http(location: &str, url: &Url) -> Result<String> {
    log::debug!("Downloading credit database from {}", url);
    let response = reqwest::blocking::get(url.as_str())
        .map_err(|e| fetch_error(location, &e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_error(location, &format!("HTTP status {}", status)));
    }

    let bytes = response
        .bytes()
        .map_err(|e| fetch_error(location, &e.to_string()))?;
    decode(bytes.to_vec())
}

fn decode(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| {
        let valid = e.utf8_error().valid_up_to();
        let prefix = String::from_utf8_lossy(&e.as_bytes()[..valid]);
        Error::MalformedDocument {
            message: format!("document is not valid UTF-8: {}", e.utf8_error()),
            location: Location::from_offset(&prefix, valid),
        }
    })
}

fn fetch_error(location: &str, message: &str) -> Error {
    Error::Fetch {
        location: location.to_string(),
        message: message.to_string(),
    }
}
