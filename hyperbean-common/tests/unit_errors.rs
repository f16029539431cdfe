use hyperbean_common::HyperbeanError;

#[test]
fn test_error_display() {
    let err = HyperbeanError::BeanNotFound(42);
    assert_eq!(err.to_string(), "Coffee bean not found: 42");
}

#[test]
fn test_error_equality() {
    let err1 = HyperbeanError::BeanNotFound(7);
    let err2 = HyperbeanError::BeanNotFound(7);
    let err3 = HyperbeanError::BeanNotFound(8);

    assert_eq!(err1, err2);
    assert_ne!(err1, err3);
}

#[test]
fn test_network_error() {
    let err = HyperbeanError::NetworkError("connection refused".to_string());
    assert_eq!(err.to_string(), "Network error: connection refused");
}

#[test]
fn test_http_error() {
    let err = HyperbeanError::HttpError(500, "Failed to fetch coffee beans".to_string());
    assert_eq!(err.to_string(), "HTTP 500: Failed to fetch coffee beans");
}

#[test]
fn test_malformed_response() {
    let err = HyperbeanError::MalformedResponse("missing field `pagination`".to_string());
    assert_eq!(err.to_string(), "Malformed response: missing field `pagination`");
}
