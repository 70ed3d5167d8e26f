//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::domain::{
    ApiError, Charset, HttpMethod, Login, MessageText, Params, Password, RawPhoneNumber,
    RawResponse, RequestInfo, SenderId, SmscResponse, ValidationError,
};
use crate::transport::{self, DecodedResponse};

/// Default SMS Center host.
pub const DEFAULT_HOST: &str = "https://smsc.kz";
/// Default timeout for establishing a connection.
pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);
/// Default timeout for the whole request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = "Web client";
/// Default `charset` parameter.
pub const DEFAULT_CHARSET: &str = Charset::DEFAULT;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: Url,
    query: Params,
    form: Params,
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: String,
}

trait HttpTransport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, Result<RawResponse, Box<dyn StdError + Send + Sync>>>;
}

/// `reqwest` applies the connect timeout per client, so one client is kept per value.
#[derive(Debug, Default)]
struct ReqwestTransport {
    cached: Mutex<Option<(Duration, reqwest::Client)>>,
}

impl ReqwestTransport {
    fn client_for(&self, connect_timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        match cached.as_ref() {
            Some((timeout, client)) if *timeout == connect_timeout => Ok(client.clone()),
            _ => {
                let client = reqwest::Client::builder()
                    .connect_timeout(connect_timeout)
                    .build()?;
                *cached = Some((connect_timeout, client.clone()));
                Ok(client)
            }
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, Result<RawResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let client = self.client_for(request.connect_timeout)?;

            let mut url = request.url;
            if !request.query.is_empty() {
                url.query_pairs_mut().extend_pairs(request.query.iter());
            }

            let builder = match request.method {
                HttpMethod::Get => client.get(url),
                HttpMethod::Post => client.post(url).form(&request.form),
            };
            let response = builder
                .timeout(request.timeout)
                .header(reqwest::header::USER_AGENT, request.user_agent)
                .send()
                .await?;

            let status = response.status().as_u16();
            // Raw bytes: UTF-8 is checked when the JSON is decoded.
            let body = response.bytes().await?;
            Ok(RawResponse::new(status, body.to_vec()))
        })
    }
}

#[derive(Debug, Clone)]
/// Login/password pair appended to every request.
pub struct Credentials {
    login: Login,
    password: Password,
}

impl Credentials {
    /// Validate that both parts are non-empty.
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            login: Login::new(login)?,
            password: Password::new(password)?,
        })
    }

    pub fn login(&self) -> &Login {
        &self.login
    }

    fn push_params(&self, params: &mut Params) {
        params.push((Login::FIELD.to_owned(), self.login.as_str().to_owned()));
        params.push((Password::FIELD.to_owned(), self.password.as_str().to_owned()));
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmscClient`].
///
/// This error preserves:
/// - transport failures (connection errors, timeouts) with the original error as source,
/// - SMS Center errors, including non-200 HTTP statuses mapped to [`ErrorCode::Unknown`],
/// - parse and validation failures.
///
/// [`ErrorCode::Unknown`]: crate::ErrorCode::Unknown
pub enum SmscError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// SMS Center reported an error, or answered with a non-200 status.
    #[error("SMS Center error: {0}")]
    Api(#[from] ApiError),

    /// Response body is not a UTF-8 JSON object.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// A domain constructor rejected a value; this includes an `error_code` outside `1..=9`.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`SmscClient`].
pub struct SmscClientBuilder {
    credentials: Credentials,
    host: String,
    connection_timeout: Duration,
    request_timeout: Duration,
    user_agent: String,
    charset: Charset,
}

impl SmscClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            host: DEFAULT_HOST.to_owned(),
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            charset: Charset::default(),
        }
    }

    /// Override the SMS Center host (scheme and authority, e.g. `https://smsc.ru`).
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// `Duration::ZERO` makes every connection attempt fail; it does not disable the timeout.
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// `Duration::ZERO` makes every request time out; it does not disable the timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Build a [`SmscClient`].
    pub fn build(self) -> Result<SmscClient, SmscError> {
        let host = Url::parse(self.host.trim()).map_err(|_| ValidationError::InvalidHost {
            input: self.host.clone(),
        })?;

        let transport = ReqwestTransport::default();
        // Fail early on a broken TLS backend instead of on the first request.
        transport
            .client_for(self.connection_timeout)
            .map_err(|err| SmscError::Transport(Box::new(err)))?;

        Ok(SmscClient {
            credentials: self.credentials,
            host,
            connection_timeout: self.connection_timeout,
            request_timeout: self.request_timeout,
            user_agent: self.user_agent,
            charset: self.charset,
            requests_counter: 0,
            last_request_info: None,
            last_response: None,
            http: Arc::new(transport),
        })
    }
}

/// SMS Center client.
///
/// Every call performs one HTTP round trip to `{host}/sys/{method}.php` and records the
/// request metadata and the raw response. Methods that issue requests take `&mut self`;
/// share a client between tasks only behind your own lock, or give each task its own client.
pub struct SmscClient {
    credentials: Credentials,
    host: Url,
    connection_timeout: Duration,
    request_timeout: Duration,
    user_agent: String,
    charset: Charset,
    requests_counter: u64,
    last_request_info: Option<RequestInfo>,
    last_response: Option<RawResponse>,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for SmscClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmscClient")
            .field("login", self.credentials.login())
            .field("host", &self.host.as_str())
            .field("requests_counter", &self.requests_counter)
            .finish_non_exhaustive()
    }
}

impl SmscClient {
    /// Create a client with default settings.
    ///
    /// For more customization, use [`SmscClient::builder`].
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, SmscError> {
        Self::builder(Credentials::new(login, password)?).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> SmscClientBuilder {
        SmscClientBuilder::new(credentials)
    }

    pub fn requests_counter(&self) -> u64 {
        self.requests_counter
    }

    pub fn last_request_info(&self) -> Option<&RequestInfo> {
        self.last_request_info.as_ref()
    }

    /// Raw response of the latest call; `None` before the first call and after a transport
    /// failure.
    pub fn last_response(&self) -> Option<&RawResponse> {
        self.last_response.as_ref()
    }

    pub fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }

    /// Applies from the next request on. A zero duration is not "no timeout": every
    /// connection attempt fails immediately.
    pub fn set_connection_timeout(&mut self, timeout: Duration) {
        self.connection_timeout = timeout;
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Applies from the next request on. A zero duration is not "no timeout": every
    /// request times out immediately with [`SmscError::Transport`].
    pub fn set_request_timeout(&mut self, timeout: Duration) {
        self.request_timeout = timeout;
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = user_agent.into();
    }

    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    pub fn set_charset(&mut self, charset: Charset) {
        self.charset = charset;
    }

    /// Call a remote method.
    ///
    /// The request is a POST carrying `post_params` as a form body whenever `post_params`
    /// is `Some`, even if empty; `get_params` is then ignored. Otherwise it is a GET with
    /// `get_params` in the query string. Credentials go into whichever set is sent.
    ///
    /// Errors:
    /// - [`SmscError::Transport`] when the request could not be completed,
    /// - [`SmscError::Api`] for non-200 statuses and for a truthy `error_code`,
    /// - [`SmscError::Parse`] when the body is not a UTF-8 JSON object, or `error_code` /
    ///   `error` are not an integer / a string,
    /// - [`SmscError::Validation`] when `error_code` is outside `1..=9`.
    pub async fn request(
        &mut self,
        method: &str,
        get_params: Option<Params>,
        post_params: Option<Params>,
    ) -> Result<SmscResponse, SmscError> {
        self.requests_counter += 1;

        let (http_method, query, form) = match post_params {
            None => {
                let mut query = get_params.unwrap_or_default();
                self.credentials.push_params(&mut query);
                (HttpMethod::Get, query, Params::new())
            }
            Some(mut form) => {
                self.credentials.push_params(&mut form);
                (HttpMethod::Post, Params::new(), form)
            }
        };

        let mut url = self.host.clone();
        url.set_path(&format!("sys/{method}.php"));

        let sent = if http_method == HttpMethod::Get {
            &query
        } else {
            &form
        };
        self.last_request_info = Some(RequestInfo {
            method: method.to_owned(),
            http_method,
            url: url.to_string(),
            param_names: sent.iter().map(|(name, _)| name.clone()).collect(),
        });

        debug!(
            method,
            http_method = %http_method,
            request_number = self.requests_counter,
            "sending SMS Center request"
        );

        let request = HttpRequest {
            method: http_method,
            url,
            query,
            form,
            connect_timeout: self.connection_timeout,
            timeout: self.request_timeout,
            user_agent: self.user_agent.clone(),
        };

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                self.last_response = None;
                return Err(SmscError::Transport(err));
            }
        };
        let response = self.last_response.insert(response);

        if !response.is_ok() {
            warn!(method, status = response.status(), "SMS Center returned HTTP error");
            return Err(ApiError::http_status(response.status()).into());
        }

        match transport::decode_json_response(response.body())
            .map_err(|err| SmscError::Parse(Box::new(err)))?
        {
            DecodedResponse::Success(object) => {
                debug!(method, "SMS Center request succeeded");
                Ok(object)
            }
            DecodedResponse::Failure { code, message } => {
                debug!(method, code, message = %message, "SMS Center reported an error");
                Err(ApiError::new(message, code)?.into())
            }
        }
    }

    /// Send one message to a single recipient (`cost=3`).
    pub async fn send_message_by_sms(
        &mut self,
        text: &MessageText,
        phone: &RawPhoneNumber,
        sender: Option<&SenderId>,
    ) -> Result<SmscResponse, SmscError> {
        let form = transport::encode_send_one_form(text, phone, sender, &self.charset);
        self.request(transport::SEND_METHOD, Some(Params::new()), Some(form))
            .await
    }

    /// Send to several recipients at once.
    ///
    /// Only `phones`, `fmt`, `sender` and `charset` are transmitted: `text` is accepted for
    /// symmetry with [`SmscClient::send_message_by_sms`] but is not sent, and neither is
    /// `cost`, so the remote defaults apply.
    ///
    /// An empty `phones` slice fails with [`ValidationError::Empty`] before any request is
    /// made, and the request counter is left unchanged.
    pub async fn send_messages_by_sms(
        &mut self,
        _text: &MessageText,
        phones: &[RawPhoneNumber],
        sender: Option<&SenderId>,
    ) -> Result<SmscResponse, SmscError> {
        ensure_recipients(phones)?;
        let form = transport::encode_send_many_form(phones, sender, &self.charset);
        self.request(transport::SEND_METHOD, None, Some(form)).await
    }

    /// Ask for the price of sending `text` to `phones` without sending it (`cost=1`).
    ///
    /// An empty `phones` slice fails with [`ValidationError::Empty`] before any request is
    /// made, and the request counter is left unchanged.
    pub async fn get_price_of_sms_messages(
        &mut self,
        text: &MessageText,
        phones: &[RawPhoneNumber],
    ) -> Result<SmscResponse, SmscError> {
        ensure_recipients(phones)?;
        let form = transport::encode_price_form(text, phones, &self.charset);
        self.request(transport::SEND_METHOD, None, Some(form)).await
    }
}

fn ensure_recipients(phones: &[RawPhoneNumber]) -> Result<(), ValidationError> {
    if phones.is_empty() {
        return Err(ValidationError::Empty {
            field: RawPhoneNumber::FIELD,
        });
    }
    Ok(())
}
