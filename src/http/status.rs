use std::fmt;
use std::hash::{Hash, Hasher};

macro_rules! statuses {
    ($($name:ident = $code:literal, $reason:literal;)*) => {
        /// Status of an HTTP response.
        ///
        /// Every named variant maps to a standard reason phrase.
        /// Codes without a name are carried by [`Status::Custom`]. Statuses
        /// compare by code, so `Custom(404)` equals `NotFound`.
        #[derive(Debug, Clone, Copy)]
        pub enum Status {
            $(
                #[doc = concat!(stringify!($code), " ", $reason)]
                $name,
            )*
            /// A status code without a known reason phrase.
            Custom(u16),
        }

        impl Status {
            /// The numeric HTTP status code.
            pub fn code(self) -> u16 {
                match self {
                    $(Status::$name => $code,)*
                    Status::Custom(code) => code,
                }
            }

            /// The canonical reason phrase, if the code has one.
            pub fn reason(self) -> Option<&'static str> {
                match self {
                    $(Status::$name => Some($reason),)*
                    Status::Custom(code) => match Status::from_code(code) {
                        Status::Custom(_) => None,
                        named => named.reason(),
                    },
                }
            }

            /// Look up the named status for a numeric code.
            pub fn from_code(code: u16) -> Status {
                match code {
                    $($code => Status::$name,)*
                    code => Status::Custom(code),
                }
            }
        }
    };
}

statuses! {
    Continue = 100, "Continue";
    SwitchingProtocols = 101, "Switching Protocols";
    EarlyHints = 103, "Early Hints";
    Ok = 200, "OK";
    Created = 201, "Created";
    Accepted = 202, "Accepted";
    NonAuthoritativeInformation = 203, "Non-Authoritative Information";
    NoContent = 204, "No Content";
    ResetContent = 205, "Reset Content";
    PartialContent = 206, "Partial Content";
    MultiStatus = 207, "Multi-Status";
    ImUsed = 226, "IM Used";
    MultipleChoices = 300, "Multiple Choices";
    MovedPermanently = 301, "Moved Permanently";
    MovedTemporarily = 302, "Found";
    SeeOther = 303, "See Other";
    NotModified = 304, "Not Modified";
    TemporaryRedirect = 307, "Temporary Redirect";
    PermanentRedirect = 308, "Permanent Redirect";
    BadRequest = 400, "Bad Request";
    Unauthorized = 401, "Unauthorized";
    PaymentRequired = 402, "Payment Required";
    Forbidden = 403, "Forbidden";
    NotFound = 404, "Not Found";
    MethodNotAllowed = 405, "Method Not Allowed";
    NotAcceptable = 406, "Not Acceptable";
    ProxyAuthenticationRequired = 407, "Proxy Authentication Required";
    RequestTimeout = 408, "Request Timeout";
    Conflict = 409, "Conflict";
    Gone = 410, "Gone";
    LengthRequired = 411, "Length Required";
    PreconditionFailed = 412, "Precondition Failed";
    PayloadTooLarge = 413, "Payload Too Large";
    UriTooLong = 414, "URI Too Long";
    UnsupportedMediaType = 415, "Unsupported Media Type";
    RangeNotSatisfiable = 416, "Range Not Satisfiable";
    ExpectationFailed = 417, "Expectation Failed";
    ImATeapot = 418, "I'm a teapot";
    MisdirectedRequest = 421, "Misdirected Request";
    UnprocessableEntity = 422, "Unprocessable Entity";
    Locked = 423, "Locked";
    FailedDependency = 424, "Failed Dependency";
    TooEarly = 425, "Too Early";
    UpgradeRequired = 426, "Upgrade Required";
    PreconditionRequired = 428, "Precondition Required";
    TooManyRequests = 429, "Too Many Requests";
    RequestHeaderFieldsTooLarge = 431, "Request Header Fields Too Large";
    UnavailableForLegalReasons = 451, "Unavailable For Legal Reasons";
    InternalServerError = 500, "Internal Server Error";
    NotImplemented = 501, "Not Implemented";
    BadGateway = 502, "Bad Gateway";
    ServiceUnavailable = 503, "Service Unavailable";
    GatewayTimeout = 504, "Gateway Timeout";
    HttpVersionNotSupported = 505, "HTTP Version Not Supported";
    VariantAlsoNegotiates = 506, "Variant Also Negotiates";
    InsufficientStorage = 507, "Insufficient Storage";
    LoopDetected = 508, "Loop Detected";
    NotExtended = 510, "Not Extended";
    NetworkAuthenticationRequired = 511, "Network Authentication Required";
}

impl Status {
    /// Returns the class of a given status.
    pub fn class(self) -> StatusClass {
        match self.code() / 100 {
            1 => StatusClass::Informational,
            2 => StatusClass::Success,
            3 => StatusClass::Redirection,
            4 => StatusClass::ClientError,
            5 => StatusClass::ServerError,
            _ => StatusClass::Custom,
        }
    }
}

impl PartialEq for Status {
    fn eq(&self, other: &Status) -> bool {
        self.code() == other.code()
    }
}

impl Eq for Status {}

impl Hash for Status {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl From<u16> for Status {
    fn from(code: u16) -> Self {
        Status::from_code(code)
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::NotFound
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{} {}", self.code(), reason),
            None => write!(f, "{}", self.code()),
        }
    }
}

/// Class of an HTTP status.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum StatusClass {
    /// A provisional response.
    Informational,

    /// The request has succeeded.
    Success,

    /// Further action needs to be taken to fulfill the request.
    Redirection,

    /// The request cannot be fulfilled due to a client error.
    ClientError,

    /// The server failed to fulfill a valid request.
    ServerError,

    /// A code outside of the standard classes.
    Custom,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_codes_round_trip() {
        assert_eq!(Status::from_code(404), Status::NotFound);
        assert_eq!(Status::NotFound.code(), 404);
        assert_eq!(Status::from(302), Status::MovedTemporarily);
        assert_eq!(Status::InternalServerError.reason(), Some("Internal Server Error"));
    }

    #[test]
    fn unknown_codes_are_custom() {
        let status = Status::from_code(299);
        assert_eq!(status, Status::Custom(299));
        assert_eq!(status.reason(), None);
        assert_eq!(status.to_string(), "299");
        assert_eq!(status.class(), StatusClass::Success);
    }

    #[test]
    fn custom_named_codes() {
        let status = Status::Custom(404);
        assert_eq!(status, Status::NotFound);
        assert_eq!(status.reason(), Some("Not Found"));
        assert_eq!(status.to_string(), "404 Not Found");
        assert_ne!(Status::Custom(599), Status::Custom(598));
    }

    #[test]
    fn defaults_to_not_found() {
        assert_eq!(Status::default(), Status::NotFound);
    }
}
