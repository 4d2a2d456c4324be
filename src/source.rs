//! Loading rule sources and writing the compiled list.
//!
//! A source is either an absolute `http(s)://` URL or a path to a local
//! file. Gzip-compressed payloads are detected by their magic bytes and
//! decompressed transparently.

use flate2::read::GzDecoder;
use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Default timeout for remote sources.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Resolves a source identifier to its text content.
pub trait SourceFetcher {
    fn fetch(&self, source: &str) -> Result<String>;
}

/// Fetches URLs over HTTP and everything else from the local filesystem.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                source_url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

impl SourceFetcher for HttpFetcher {
    fn fetch(&self, source: &str) -> Result<String> {
        let bytes = if is_url(source) {
            log::info!("Downloading {}", source);
            self.download(source)?
        } else if Path::new(source).is_file() {
            log::info!("Reading {}", source);
            fs::read(source)?
        } else {
            return Err(Error::InvalidSource(source.to_string()));
        };

        decode(bytes)
    }
}

/// True for absolute URLs with both a scheme and a host.
pub fn is_url(source: &str) -> bool {
    match reqwest::Url::parse(source) {
        Ok(url) => !url.scheme().is_empty() && url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

/// Decompress gzip payloads and decode as UTF-8 (lossy).
fn decode(bytes: Vec<u8>) -> Result<String> {
    if bytes.starts_with(&GZIP_MAGIC) {
        let mut decoder = GzDecoder::new(bytes.as_slice());
        let mut inflated = Vec::new();
        decoder.read_to_end(&mut inflated)?;
        return Ok(lossy_utf8(inflated));
    }

    Ok(lossy_utf8(bytes))
}

fn lossy_utf8(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Split text into trimmed lines on `\n` or `\r\n`.
pub fn split_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines().map(|line| line.trim().to_string())
}

/// Read a list of sources, one per line. Blank lines and `#` comments are skipped.
pub fn read_source_list(path: &Path) -> Result<Vec<String>> {
    let file = fs::File::open(path)?;
    let mut sources = Vec::new();

    for line in BufReader::new(file).lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        sources.push(line.to_string());
    }

    Ok(sources)
}

/// Write one rule per line.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}
