use tower::timeout::error::Elapsed;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why an HTTP exchange with the GraphQL endpoint failed
#[derive(thiserror::Error, Debug)]
pub enum HttpServiceError {
    /// The request could not be assembled
    #[error("Could not build the request: {0}")]
    Request(#[from] http::Error),
    /// A header value, usually a token, contains characters headers cannot carry
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
    /// No response arrived before the configured timeout
    #[error("The endpoint did not respond in time")]
    TimedOut,
    /// The endpoint could not be reached at all
    #[error("Could not connect to the endpoint: {0}")]
    Connect(BoxError),
    /// The request or response body could not be streamed
    #[error("Could not transfer the body: {0}")]
    Body(BoxError),
    /// The response could not be decoded
    #[error("Could not decode the response: {0}")]
    Decode(BoxError),
    /// Anything the transport reports that fits none of the above
    #[error("Unexpected transport error: {0}")]
    Other(BoxError),
}

impl HttpServiceError {
    /// Whether the endpoint was unreachable
    pub const fn is_connect(&self) -> bool {
        matches!(self, HttpServiceError::Connect(_))
    }

    /// Whether the request ran out of time
    pub const fn is_timeout(&self) -> bool {
        matches!(self, HttpServiceError::TimedOut)
    }
}

impl From<reqwest::Error> for HttpServiceError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            HttpServiceError::TimedOut
        } else if value.is_connect() {
            HttpServiceError::Connect(value.into())
        } else if value.is_body() {
            HttpServiceError::Body(value.into())
        } else if value.is_decode() {
            HttpServiceError::Decode(value.into())
        } else {
            HttpServiceError::Other(value.into())
        }
    }
}

/// Unwraps the boxed errors `tower` middleware produces
impl From<BoxError> for HttpServiceError {
    fn from(err: BoxError) -> Self {
        if err.is::<Elapsed>() {
            return HttpServiceError::TimedOut;
        }
        let err = match err.downcast::<reqwest::Error>() {
            Ok(err) => return HttpServiceError::from(*err),
            Err(err) => err,
        };
        match err.downcast::<HttpServiceError>() {
            Ok(err) => *err,
            Err(err) => HttpServiceError::Other(err),
        }
    }
}
