//! User agent and standard headers

/// Build the identifying user agent sent to upstream APIs
pub fn identify(application: &str) -> String {
    format!("{} wikisource-bot/{}", application, crate::VERSION)
}

/// Standard accept header for JSON requests
pub fn accept_json() -> &'static str {
    "application/json,text/javascript,*/*;q=0.01"
}
