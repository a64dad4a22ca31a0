use rawhttp::http::parser::{Limits, ParseError, parse_http_request, parse_http_request_limited};
use rawhttp::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.target, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_request_without_headers() {
    let req = b"GET /echo/abc HTTP/1.1\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.target, "/echo/abc");
    assert!(parsed.headers.is_empty());
    assert!(parsed.body.is_empty());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /files/a.txt HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.target, "/files/a.txt");
    assert_eq!(parsed.body, b"hello".to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_multiple_headers_keep_order() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    let pairs: Vec<_> = parsed.headers.iter().collect();
    assert_eq!(
        pairs,
        vec![
            ("Host", "example.com"),
            ("User-Agent", "test-client"),
            ("Accept", "*/*"),
        ]
    );
}

#[test]
fn test_parse_duplicate_header_last_wins() {
    let req = b"GET / HTTP/1.1\r\nX-Token: first\r\nHost: h\r\nX-Token: second\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.len(), 2);
    assert_eq!(parsed.headers.get("X-Token"), Some("second"));
}

#[test]
fn test_parse_header_value_whitespace_is_trimmed() {
    let req = b"GET / HTTP/1.1\r\nUser-Agent:curl/8.0\r\nAccept:    */*   \r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("User-Agent"), Some("curl/8.0"));
    assert_eq!(parsed.header("Accept"), Some("*/*"));
}

#[test]
fn test_parse_header_value_keeps_later_colons() {
    let req = b"GET / HTTP/1.1\r\nHost: localhost:4221\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("Host"), Some("localhost:4221"));
}

#[test]
fn test_parse_header_case_preservation() {
    let req = b"GET / HTTP/1.1\r\nContent-Type: application/json\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("Content-Type"), Some("application/json"));
    assert_eq!(parsed.header("content-type"), None);
}

#[test]
fn test_parse_target_is_verbatim() {
    let req = b"GET no-leading-slash?q=1 HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.target, "no-leading-slash?q=1");
}

#[test]
fn test_parse_unknown_method_is_kept() {
    let req = b"BREW /pot HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::Other("BREW".to_string()));
}

#[test]
fn test_parse_wrong_protocol_version() {
    for line in ["GET / FTP/1.0", "GET / HTTP/1.0", "GET / HTTP/2", "GET / http/1.1"] {
        let req = format!("{}\r\n\r\n", line);
        let result = parse_http_request(req.as_bytes());

        assert_eq!(result.unwrap_err(), ParseError::UnsupportedVersion, "{line}");
    }
}

#[test]
fn test_parse_wrong_token_count() {
    for line in ["GET /", "GET", "GET  / HTTP/1.1", "GET / HTTP/1.1 extra", ""] {
        let req = format!("{}\r\n\r\n", line);
        let result = parse_http_request(req.as_bytes());

        assert_eq!(result.unwrap_err(), ParseError::InvalidRequestLine, "{line:?}");
    }
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_incomplete_request_partial_body() {
    let req = b"POST /api HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_content_length_any_case() {
    let req = b"POST /api HTTP/1.1\r\ncontent-length: 3\r\n\r\nabcdef";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"abc".to_vec());
    assert_eq!(consumed, req.len() - 3);
}

#[test]
fn test_parse_invalid_content_length() {
    let req = b"POST /api HTTP/1.1\r\nContent-Length: lots\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidContentLength)));
}

#[test]
fn test_parse_malformed_header() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidHeader)));
}

#[test]
fn test_parse_non_utf8_head() {
    let req = b"GET /\xff HTTP/1.1\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidEncoding)));
}

#[test]
fn test_parse_request_with_binary_body() {
    let req = b"POST /upload HTTP/1.1\r\nContent-Length: 5\r\n\r\n\x00\x01\xff\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, vec![0, 1, 0xff, b'\r', b'\n']);
}

#[test]
fn test_parse_declared_body_over_limit() {
    let req = b"POST /files/huge HTTP/1.1\r\nContent-Length: 18446744073709551615\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::BodyTooLarge)));
}

#[test]
fn test_parse_body_limit_is_configurable() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 4\r\n\r\nabcd";
    let limits = Limits {
        max_body_bytes: 3,
        ..Limits::default()
    };

    assert!(matches!(
        parse_http_request_limited(req, limits),
        Err(ParseError::BodyTooLarge)
    ));
}
