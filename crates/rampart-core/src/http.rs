//! Shorthand constructors for standard HTTP errors
//!
//! Each returns a builder preloaded with the status, its canonical title,
//! an upper-snake code and `detail = title`:
//!
//! ```
//! let err = rampart_core::http::not_found().detail("order 7 does not exist").build()?;
//! assert_eq!(err.code(), "NOT_FOUND");
//! # Ok::<(), rampart_core::RampartError>(())
//! ```

use http::StatusCode;

use crate::api_error::ApiErrorBuilder;
use crate::ApiError;

fn preset(status: u16, title: &str, code: &str) -> ApiErrorBuilder {
    // only called with the literals below, all of which are valid
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    ApiError::builder(status, title, title, code)
}

macro_rules! http_errors {
    ($($name:ident => $status:literal, $title:literal, $code:literal;)*) => {
        $(
            #[doc = concat!("`", stringify!($status), " ", $title, "`")]
            pub fn $name() -> ApiErrorBuilder {
                preset($status, $title, $code)
            }
        )*
    };
}

http_errors! {
    bad_request => 400, "Bad Request", "BAD_REQUEST";
    unauthorized => 401, "Unauthorized", "UNAUTHORIZED";
    payment_required => 402, "Payment Required", "PAYMENT_REQUIRED";
    forbidden => 403, "Forbidden", "FORBIDDEN";
    not_found => 404, "Not Found", "NOT_FOUND";
    method_not_allowed => 405, "Method Not Allowed", "METHOD_NOT_ALLOWED";
    not_acceptable => 406, "Not Acceptable", "NOT_ACCEPTABLE";
    proxy_authentication_required => 407, "Proxy Authentication Required", "PROXY_AUTHENTICATION_REQUIRED";
    request_timeout => 408, "Request Timeout", "REQUEST_TIMEOUT";
    conflict => 409, "Conflict", "CONFLICT";
    gone => 410, "Gone", "GONE";
    length_required => 411, "Length Required", "LENGTH_REQUIRED";
    precondition_failed => 412, "Precondition Failed", "PRECONDITION_FAILED";
    payload_too_large => 413, "Payload Too Large", "PAYLOAD_TOO_LARGE";
    uri_too_long => 414, "URI Too Long", "URI_TOO_LONG";
    unsupported_media_type => 415, "Unsupported Media Type", "UNSUPPORTED_MEDIA_TYPE";
    range_not_satisfiable => 416, "Range Not Satisfiable", "RANGE_NOT_SATISFIABLE";
    expectation_failed => 417, "Expectation Failed", "EXPECTATION_FAILED";
    im_a_teapot => 418, "I'm a teapot", "IM_A_TEAPOT";
    misdirected_request => 421, "Misdirected Request", "MISDIRECTED_REQUEST";
    unprocessable_entity => 422, "Unprocessable Entity", "UNPROCESSABLE_ENTITY";
    locked => 423, "Locked", "LOCKED";
    failed_dependency => 424, "Failed Dependency", "FAILED_DEPENDENCY";
    too_early => 425, "Too Early", "TOO_EARLY";
    upgrade_required => 426, "Upgrade Required", "UPGRADE_REQUIRED";
    precondition_required => 428, "Precondition Required", "PRECONDITION_REQUIRED";
    too_many_requests => 429, "Too Many Requests", "TOO_MANY_REQUESTS";
    request_header_fields_too_large => 431, "Request Header Fields Too Large", "REQUEST_HEADER_FIELDS_TOO_LARGE";
    unavailable_for_legal_reasons => 451, "Unavailable For Legal Reasons", "UNAVAILABLE_FOR_LEGAL_REASONS";

    internal_server_error => 500, "Internal Server Error", "INTERNAL_SERVER_ERROR";
    not_implemented => 501, "Not Implemented", "NOT_IMPLEMENTED";
    bad_gateway => 502, "Bad Gateway", "BAD_GATEWAY";
    service_unavailable => 503, "Service Unavailable", "SERVICE_UNAVAILABLE";
    gateway_timeout => 504, "Gateway Timeout", "GATEWAY_TIMEOUT";
    http_version_not_supported => 505, "HTTP Version Not Supported", "HTTP_VERSION_NOT_SUPPORTED";
    variant_also_negotiates => 506, "Variant Also Negotiates", "VARIANT_ALSO_NEGOTIATES";
    insufficient_storage => 507, "Insufficient Storage", "INSUFFICIENT_STORAGE";
    loop_detected => 508, "Loop Detected", "LOOP_DETECTED";
    not_extended => 510, "Not Extended", "NOT_EXTENDED";
    network_authentication_required => 511, "Network Authentication Required", "NETWORK_AUTHENTICATION_REQUIRED";
}
