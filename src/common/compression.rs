//! Response decompression for HTTP content encoding.
//!
//! EWS bodies are parsed from a fully aggregated buffer, so only the
//! aggregated decompression path exists here.

use anyhow::Result;
use async_compression::tokio::bufread::{BrotliDecoder, GzipDecoder, ZstdDecoder};
use bytes::Bytes;
use hyper::{HeaderMap, header, http};
use tokio::io::{AsyncBufRead, AsyncReadExt, BufReader};

/// Supported content encodings for response decompression.
///
/// These values correspond to the `Content-Encoding` header and decide how
/// the body buffer is wrapped before reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Identity,
    Br,
    Gzip,
    Zstd,
}

impl ContentEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentEncoding::Identity => "identity",
            ContentEncoding::Br => "br",
            ContentEncoding::Gzip => "gzip",
            ContentEncoding::Zstd => "zstd",
        }
    }
}

/// Detect the response `Content-Encoding` header and return the ordered chain
/// of encodings, outermost first. An empty vector means identity; an explicit
/// `identity` token is kept in the chain and decodes as a pass-through.
pub fn detect_encodings(headers: &HeaderMap) -> Vec<ContentEncoding> {
    let Some(val) = headers.get(header::CONTENT_ENCODING) else {
        return Vec::new();
    };

    let Ok(raw) = val.to_str() else {
        return Vec::new();
    };

    raw.split(',')
        .filter_map(|token| {
            let enc = token.trim().to_ascii_lowercase();
            Some(match enc.as_str() {
                "identity" => ContentEncoding::Identity,
                "br" => ContentEncoding::Br,
                "gzip" => ContentEncoding::Gzip,
                "zstd" | "zst" => ContentEncoding::Zstd,
                _ => return None,
            })
        })
        .collect()
}

/// Insert an `Accept-Encoding` header (`br, zstd, gzip`) if not already present.
pub fn add_accept_encoding(h: &mut HeaderMap) {
    if !h.contains_key(header::ACCEPT_ENCODING) {
        h.insert(
            header::ACCEPT_ENCODING,
            http::HeaderValue::from_static("br, zstd, gzip"),
        );
    }
}

/// Decompress an aggregated response body according to the encoding chain.
pub async fn decompress_body(body: Bytes, encodings: &[ContentEncoding]) -> Result<Bytes> {
    if encodings
        .iter()
        .all(|enc| *enc == ContentEncoding::Identity)
    {
        return Ok(body);
    }

    let mut current: Box<dyn AsyncBufRead + Unpin + Send + '_> =
        Box::new(BufReader::new(&body[..]));
    for encoding in encodings.iter().rev() {
        current = match encoding {
            ContentEncoding::Identity => current,
            ContentEncoding::Br => Box::new(BufReader::new(BrotliDecoder::new(current))),
            ContentEncoding::Gzip => Box::new(BufReader::new(GzipDecoder::new(current))),
            ContentEncoding::Zstd => Box::new(BufReader::new(ZstdDecoder::new(current))),
        };
    }

    let mut out = Vec::with_capacity(body.len().saturating_mul(4));
    current.read_to_end(&mut out).await?;
    Ok(Bytes::from(out))
}
