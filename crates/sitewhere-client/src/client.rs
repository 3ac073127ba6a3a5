use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use tracing::debug;

use url::Url;

use crate::auth::{Authorizer, Credentials, JwtAuthorizer};
use crate::error::{Error, ErrorKind, Result};

/// The header selecting the tenant a request is addressed to.
pub const TENANT_ID_HEADER: &str = "X-SiteWhere-Tenant-Id";

/// The header carrying the authentication token of a tenant.
pub const TENANT_AUTH_HEADER: &str = "X-SiteWhere-Tenant-Auth";

fn header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let invalid = |e: &dyn std::fmt::Display| {
        Error::new(
            ErrorKind::Encoding,
            format!("The `{name}` header is invalid: {e}"),
        )
    };

    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(&e))?;
    let header_value = HeaderValue::from_str(value).map_err(|e| invalid(&e))?;

    Ok((header_name, header_value))
}

/// A SiteWhere tenant.
///
/// When configured, every request is addressed to this tenant.
#[derive(Clone, PartialEq, Eq)]
pub struct Tenant {
    id: String,
    auth_token: String,
}

impl Tenant {
    /// Creates a [`Tenant`] from its identifier and authentication token.
    #[must_use]
    #[inline]
    pub fn new(id: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            auth_token: auth_token.into(),
        }
    }

    /// Returns the tenant identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        let (name, id) = header(TENANT_ID_HEADER, &self.id)?;
        let _ = headers.insert(name, id);

        let (name, mut auth_token) = header(TENANT_AUTH_HEADER, &self.auth_token)?;
        auth_token.set_sensitive(true);
        let _ = headers.insert(name, auth_token);

        Ok(headers)
    }
}

impl std::fmt::Debug for Tenant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tenant")
            .field("id", &self.id)
            .field("auth_token", &"<hidden>")
            .finish()
    }
}

/// A [`Client`] configuration.
pub struct ClientBuilder {
    base_url: String,
    credentials: Credentials,
    authorizer: Option<Arc<dyn Authorizer>>,
    tenant: Option<Tenant>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: Credentials::default(),
            authorizer: None,
            tenant: None,
            timeout: None,
        }
    }

    /// Sets the [`Credentials`] handed to the [`Authorizer`].
    ///
    /// When not set, [`Credentials::default`] is used.
    #[must_use]
    #[inline]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Sets the [`Authorizer`].
    ///
    /// When not set, a [`JwtAuthorizer`] bound to the same base URL is used.
    #[must_use]
    #[inline]
    pub fn authorizer(mut self, authorizer: impl Authorizer + 'static) -> Self {
        self.authorizer = Some(Arc::new(authorizer));
        self
    }

    /// Addresses every request to the given [`Tenant`].
    #[must_use]
    #[inline]
    pub fn tenant(mut self, tenant: Tenant) -> Self {
        self.tenant = Some(tenant);
        self
    }

    /// Sets the timeout of each request.
    ///
    /// When not set, the default timeout of the HTTP client is used.
    #[must_use]
    #[inline]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`Client`].
    ///
    /// # Errors
    ///
    /// - The base URL is invalid or cannot be used as a base
    /// - The tenant identifier or token cannot be sent as a header value
    /// - The HTTP client cannot be initialized
    pub fn build(self) -> Result<Client> {
        let base_url = Url::parse(&self.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::new(
                ErrorKind::Url,
                format!("`{base_url}` cannot be used as a base URL"),
            ));
        }

        let headers = match &self.tenant {
            Some(tenant) => tenant.headers()?,
            None => HeaderMap::new(),
        };

        let mut http = HttpClient::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http.build()?;

        let authorizer = match self.authorizer {
            Some(authorizer) => authorizer,
            None => Arc::new(JwtAuthorizer::with_client(http.clone(), &base_url)?),
        };

        debug!("Client configured for {base_url}");

        Ok(Client {
            http,
            base_url,
            credentials: self.credentials,
            authorizer,
        })
    }
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("tenant", &self.tenant)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// A client for the device-management API of a SiteWhere instance.
///
/// Each operation is a blocking call that sends one request and waits for
/// its response. A bearer credential is requested from the configured
/// [`Authorizer`] before every request.
///
/// The client holds no state between calls, so it can be cloned and shared
/// among threads, each call being an independent exchange.
#[derive(Clone)]
pub struct Client {
    http: HttpClient,
    base_url: Url,
    credentials: Credentials,
    authorizer: Arc<dyn Authorizer>,
}

impl Client {
    /// Creates a [`ClientBuilder`] for the SiteWhere instance reachable at
    /// the given base URL.
    #[must_use]
    #[inline]
    pub fn builder(base_url: &str) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    /// Creates a [`Client`] with the default configuration.
    ///
    /// # Errors
    ///
    /// Same as [`ClientBuilder::build`].
    #[inline]
    pub fn new(base_url: &str) -> Result<Self> {
        Self::builder(base_url).build()
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the [`Credentials`].
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub(crate) const fn http(&self) -> &HttpClient {
        &self.http
    }

    pub(crate) fn bearer_credential(&self) -> Result<String> {
        let credential = self.authorizer.authorize(
            self.credentials.principal(),
            self.credentials.credential(),
        )?;

        if credential.is_empty() {
            return Err(Error::new(
                ErrorKind::Authorization,
                "Empty bearer credential",
            ));
        }

        if let Err(e) = HeaderValue::from_str(&credential) {
            return Err(Error::new(
                ErrorKind::Authorization,
                format!("The bearer credential is not a valid header value: {e}"),
            ));
        }

        Ok(credential)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
