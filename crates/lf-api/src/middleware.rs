//! lost-found/crates/lf-api/src/middleware.rs Middleware
//!
//! Request logging and default response headers.

use actix_web::middleware::{DefaultHeaders, Logger};

// Returns the request logger used by the binary.
pub fn standard_middleware() -> Logger {
    // remote-ip "request-line" status-code response-size "referrer" "user-agent"
    Logger::default()
}

// Headers added to every response. Inline `data:` images are allowed because
// that is how item photos are stored.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("Referrer-Policy", "strict-origin-when-cross-origin"))
        .add((
            "Content-Security-Policy",
            "default-src 'self'; img-src 'self' data:; style-src 'self' 'unsafe-inline'; script-src 'unsafe-inline'",
        ))
}
