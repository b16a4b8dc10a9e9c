// src/core/net.rs
//
// One blocking HTTPS GET. No retries: the caller decides whether to try again.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::NetworkError;

pub fn http_get(url: &str, user_agent: &str, timeout: Duration) -> Result<String, NetworkError> {
    let client = Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|e| NetworkError::Request(e.to_string()))?;

    logd!("Net: GET {url} (timeout={timeout:?})");

    let resp = client
        .get(url)
        .send()
        .map_err(|e| classify(url, timeout, e))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(NetworkError::Status { code: status.as_u16(), url: s!(url) });
    }

    let body = resp.text().map_err(|e| {
        if e.is_timeout() {
            NetworkError::Timeout { url: s!(url), after: timeout }
        } else {
            NetworkError::Body(e.to_string())
        }
    })?;

    logd!("Net: {} {url} ({} bytes)", status.as_u16(), body.len());
    Ok(body)
}

fn classify(url: &str, timeout: Duration, e: reqwest::Error) -> NetworkError {
    if e.is_timeout() {
        NetworkError::Timeout { url: s!(url), after: timeout }
    } else if e.is_connect() {
        NetworkError::Connect { url: s!(url), msg: e.to_string() }
    } else {
        NetworkError::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{ Read, Write };
    use std::net::TcpListener;
    use std::thread;

    /// Accepts one connection, reads the request head, then runs `reply`.
    fn serve_once<F>(reply: F) -> String
    where
        F: FnOnce(&mut std::net::TcpStream) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/wiki/List", listener.local_addr().unwrap());
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let mut head = Vec::new();
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => head.extend_from_slice(&buf[..n]),
                }
            }
            reply(&mut stream);
        });
        url
    }

    fn respond(stream: &mut std::net::TcpStream, status: &str, body: &str) {
        let msg = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(msg.as_bytes());
    }

    #[test]
    fn ok_response_returns_body() {
        let url = serve_once(|s| respond(s, "200 OK", "<html>ok</html>"));
        let body = http_get(&url, "revenue_scrape-test", Duration::from_secs(5)).unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[test]
    fn non_success_status_is_reported() {
        let url = serve_once(|s| respond(s, "503 Service Unavailable", "busy"));
        let err = http_get(&url, "revenue_scrape-test", Duration::from_secs(5)).unwrap_err();
        assert_eq!(err, NetworkError::Status { code: 503, url });
    }

    #[test]
    fn slow_server_times_out() {
        let url = serve_once(|s| {
            thread::sleep(Duration::from_secs(3));
            respond(s, "200 OK", "late");
        });
        let err = http_get(&url, "revenue_scrape-test", Duration::from_millis(500)).unwrap_err();
        assert_eq!(err, NetworkError::Timeout { url, after: Duration::from_millis(500) });
        assert!(err.to_string().ends_with("timed out after 500ms"));
    }

    #[test]
    fn refused_connection_is_connect_error() {
        // Bind then drop, so nothing listens on the port
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}/");
        let err = http_get(&url, "revenue_scrape-test", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, NetworkError::Connect { .. }), "{err:?}");
    }
}
