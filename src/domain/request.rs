use std::fmt;

/// Ordered request parameters, encoded either as a query string or a form body.
pub type Params = Vec<(String, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Value of the `cost` parameter of the `send` method.
pub enum CostMode {
    /// Only calculate the price, nothing is sent (`cost=1`).
    PriceOnly,
    /// Send the message and report its cost (`cost=3`).
    #[default]
    SendAndReport,
}

impl CostMode {
    pub const FIELD: &'static str = "cost";

    pub fn as_param(self) -> &'static str {
        match self {
            Self::PriceOnly => "1",
            Self::SendAndReport => "3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Value of the `fmt` parameter. The client only decodes JSON responses.
pub enum ResponseFormat {
    #[default]
    Json,
}

impl ResponseFormat {
    pub const FIELD: &'static str = "fmt";

    pub fn as_param(self) -> &'static str {
        match self {
            Self::Json => "3",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Metadata of the most recent request issued by the client.
///
/// Parameter values are not retained, so credentials never end up here.
pub struct RequestInfo {
    /// Remote method name, e.g. `send`.
    pub method: String,
    pub http_method: HttpMethod,
    /// Endpoint URL without the query string.
    pub url: String,
    /// Names of the parameters sent, in order.
    pub param_names: Vec<String>,
}
