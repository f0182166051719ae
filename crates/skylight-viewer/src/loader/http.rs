//! Blocking HTTP/1.1 GET client.
//!
//! One request per call over a plain `TcpStream`: send `GET` with
//! `Connection: close`, read to EOF, parse the status line and headers,
//! decode the body. No TLS, no redirect following, no retries; anything
//! the server does beyond a 2xx with a body surfaces as a fetch error.

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use skylight_types::error::{Result, SkylightError};

use super::{DocumentFetcher, Url};

/// Maximum response body size (8 MB).
const MAX_BODY_SIZE: usize = 8 * 1024 * 1024;

/// TCP connect timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// TCP read timeout.
const READ_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches documents over plain HTTP.
pub struct HttpFetcher;

impl DocumentFetcher for HttpFetcher {
    fn fetch(&mut self, url: &Url) -> Result<Vec<u8>> {
        if url.scheme != "http" {
            return Err(SkylightError::UnsupportedScheme(url.scheme.clone()));
        }
        let response = do_request(url)?;
        if !(200..300).contains(&response.status_code) {
            return Err(SkylightError::Fetch(format!(
                "HTTP {} for {url}",
                response.status_code,
            )));
        }
        Ok(response.body)
    }
}

// ------------------------------------------------------------------
// Internals
// ------------------------------------------------------------------

/// A raw parsed HTTP response.
#[derive(Debug)]
struct HttpResponse {
    status_code: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

/// Connect, send GET, read and parse.
fn do_request(url: &Url) -> Result<HttpResponse> {
    let port = url.port.unwrap_or(80);
    let mut stream = tcp_connect(&url.host, port)?;
    send_request(&mut stream, url)?;
    let raw = read_response(&mut stream)?;
    parse_response(&raw)
}

/// Open a TCP connection with a connect timeout.
fn tcp_connect(host: &str, port: u16) -> Result<TcpStream> {
    use std::net::ToSocketAddrs;

    let addr = format!("{host}:{port}")
        .to_socket_addrs()
        .map_err(|e| SkylightError::Fetch(format!("resolving {host}: {e}")))?
        .next()
        .ok_or_else(|| SkylightError::Fetch(format!("no addresses for {host}:{port}")))?;

    let stream = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT)
        .map_err(|e| SkylightError::Fetch(format!("connecting to {host}:{port}: {e}")))?;
    stream
        .set_read_timeout(Some(READ_TIMEOUT))
        .map_err(|e| SkylightError::Fetch(format!("set read timeout: {e}")))?;

    Ok(stream)
}

/// Send an HTTP/1.1 GET request.
fn send_request(stream: &mut impl Write, url: &Url) -> Result<()> {
    let host_header = match url.port {
        Some(p) if p != 80 => format!("{}:{}", url.host, p),
        _ => url.host.clone(),
    };

    let path = match url.query {
        Some(ref q) => format!("{}?{}", url.path, q),
        None => url.path.clone(),
    };

    let request = format!(
        "GET {path} HTTP/1.1\r\n\
         Host: {host_header}\r\n\
         User-Agent: skylight/0.1\r\n\
         Accept: */*\r\n\
         Connection: close\r\n\
         \r\n"
    );

    stream
        .write_all(request.as_bytes())
        .map_err(|e| SkylightError::Fetch(format!("send request: {e}")))?;

    Ok(())
}

/// Read the whole response until EOF or until the read timeout fires.
fn read_response(stream: &mut impl Read) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(8192);
    let mut chunk = [0u8; 8192];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                if buf.len() + n > MAX_BODY_SIZE + 4096 {
                    return Err(SkylightError::Fetch("response too large".to_string()));
                }
                buf.extend_from_slice(&chunk[..n]);
            },
            Err(e)
                if e.kind() == io::ErrorKind::WouldBlock || e.kind() == io::ErrorKind::TimedOut =>
            {
                break;
            },
            Err(e) => {
                return Err(SkylightError::Fetch(format!("read response: {e}")));
            },
        }
    }
    Ok(buf)
}

/// Parse raw bytes into status code, headers, and body.
fn parse_response(data: &[u8]) -> Result<HttpResponse> {
    let header_end = find_subsequence(data, b"\r\n\r\n").ok_or_else(|| {
        SkylightError::Fetch("malformed HTTP response: no header terminator".to_string())
    })?;

    let header_bytes = &data[..header_end];
    let body_start = header_end + 4;

    let header_str = std::str::from_utf8(header_bytes)
        .map_err(|_| SkylightError::Fetch("non-UTF-8 headers".to_string()))?;

    let mut lines = header_str.split("\r\n");
    let status_line = lines
        .next()
        .ok_or_else(|| SkylightError::Fetch("empty response".to_string()))?;
    let status_code = parse_status_line(status_line)?;

    let mut headers = Vec::new();
    for line in lines {
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_lowercase(), value.trim().to_string()));
        }
    }

    let raw_body = &data[body_start..];
    let body = if find_header(&headers, "transfer-encoding").is_some_and(|v| v.contains("chunked"))
    {
        decode_chunked(raw_body)?
    } else if let Some(cl) = find_header(&headers, "content-length") {
        let len: usize = cl
            .parse()
            .map_err(|_| SkylightError::Fetch("bad Content-Length".to_string()))?;
        if len > MAX_BODY_SIZE {
            return Err(SkylightError::Fetch(
                "response body exceeds 8 MB limit".to_string(),
            ));
        }
        raw_body[..raw_body.len().min(len)].to_vec()
    } else {
        raw_body.to_vec()
    };

    if body.len() > MAX_BODY_SIZE {
        return Err(SkylightError::Fetch(
            "response body exceeds 8 MB limit".to_string(),
        ));
    }

    Ok(HttpResponse {
        status_code,
        headers,
        body,
    })
}

/// Parse the HTTP status code from the status line.
fn parse_status_line(line: &str) -> Result<u16> {
    // Expected: "HTTP/1.x NNN ..."
    let parts: Vec<&str> = line.splitn(3, ' ').collect();
    if parts.len() < 2 {
        return Err(SkylightError::Fetch(format!("bad status line: {line}")));
    }
    parts[1]
        .parse()
        .map_err(|_| SkylightError::Fetch(format!("bad status code in: {line}")))
}

/// Case-insensitive header lookup.
fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    let name_lower = name.to_lowercase();
    headers
        .iter()
        .find(|(k, _)| k == &name_lower)
        .map(|(_, v)| v.as_str())
}

/// Decode a chunked transfer-encoded body.
fn decode_chunked(data: &[u8]) -> Result<Vec<u8>> {
    let mut result = Vec::new();
    let mut pos = 0;

    while let Some(i) = find_subsequence(&data[pos..], b"\r\n") {
        let line_end = pos + i;

        let size_str = std::str::from_utf8(&data[pos..line_end])
            .map_err(|_| SkylightError::Fetch("bad chunk size".to_string()))?
            .trim();
        // Strip optional chunk extensions (after `;`).
        let size_str = size_str.split(';').next().unwrap_or("").trim();

        let chunk_size = usize::from_str_radix(size_str, 16)
            .map_err(|_| SkylightError::Fetch("bad chunk size".to_string()))?;
        if chunk_size == 0 {
            break;
        }

        let chunk_start = line_end + 2;
        let chunk_end = chunk_start + chunk_size;
        if chunk_end > data.len() {
            // Partial final chunk -- take what arrived.
            result.extend_from_slice(&data[chunk_start..]);
            break;
        }

        if result.len() + chunk_size > MAX_BODY_SIZE {
            return Err(SkylightError::Fetch(
                "chunked body exceeds 8 MB limit".to_string(),
            ));
        }

        result.extend_from_slice(&data[chunk_start..chunk_end]);
        pos = chunk_end + 2;
    }

    Ok(result)
}

/// Find the position of a byte subsequence in a slice.
fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
