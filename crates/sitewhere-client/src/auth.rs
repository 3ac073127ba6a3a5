use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;

use tracing::debug;

use url::Url;

use crate::error::{Error, ErrorKind, Result};
use crate::request::{JWT, Operation, join_url};

/// The principal used when no [`Credentials`] are configured.
pub const DEFAULT_PRINCIPAL: &str = "admin";

/// The credential used when no [`Credentials`] are configured.
pub const DEFAULT_CREDENTIAL: &str = "password";

/// The response header carrying the JSON web token issued by a SiteWhere
/// instance.
pub const JWT_HEADER: &str = "X-Sitewhere-JWT";

/// A principal and credential pair.
///
/// It is handed to the [`Authorizer`] every time a bearer credential is
/// needed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    principal: String,
    credential: String,
}

impl Credentials {
    /// Creates [`Credentials`] from a principal and its credential.
    #[must_use]
    #[inline]
    pub fn new(principal: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            credential: credential.into(),
        }
    }

    /// Returns the principal.
    #[must_use]
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Returns the credential.
    #[must_use]
    pub fn credential(&self) -> &str {
        &self.credential
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_PRINCIPAL, DEFAULT_CREDENTIAL)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("principal", &self.principal)
            .field("credential", &"<hidden>")
            .finish()
    }
}

/// A provider of bearer credentials.
///
/// The client asks for a bearer credential before sending each request.
/// Closures taking a principal and a credential implement this trait too.
pub trait Authorizer: Send + Sync {
    /// Returns a bearer credential for the given principal and credential.
    ///
    /// # Errors
    ///
    /// An error is returned when the principal cannot be authorized.
    fn authorize(&self, principal: &str, credential: &str) -> Result<String>;
}

impl<F> Authorizer for F
where
    F: Fn(&str, &str) -> Result<String> + Send + Sync,
{
    fn authorize(&self, principal: &str, credential: &str) -> Result<String> {
        self(principal, credential)
    }
}

/// An [`Authorizer`] returning an already issued bearer credential.
///
/// The principal and credential are ignored.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticToken(String);

impl StaticToken {
    /// Creates a [`StaticToken`].
    #[must_use]
    #[inline]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticToken").field(&"<hidden>").finish()
    }
}

impl Authorizer for StaticToken {
    fn authorize(&self, _principal: &str, _credential: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// An [`Authorizer`] requesting a JSON web token from a SiteWhere instance.
///
/// The principal and credential are sent through HTTP basic authentication
/// to the `/sitewhere/authapi/jwt` endpoint, which answers with the token
/// in the [`JWT_HEADER`] header.
#[derive(Debug, Clone)]
pub struct JwtAuthorizer {
    http: HttpClient,
    url: Url,
}

impl JwtAuthorizer {
    /// Creates a [`JwtAuthorizer`] for the SiteWhere instance reachable at
    /// the given base URL.
    ///
    /// # Errors
    ///
    /// An error is returned when the base URL cannot be joined with the
    /// endpoint path or when the HTTP client cannot be initialized.
    pub fn new(base_url: &Url) -> Result<Self> {
        Self::with_client(HttpClient::builder().build()?, base_url)
    }

    pub(crate) fn with_client(http: HttpClient, base_url: &Url) -> Result<Self> {
        let url = join_url(base_url, JWT, None)?;
        Ok(Self { http, url })
    }

    /// Returns the URL of the endpoint issuing the tokens.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    fn request_token(&self, principal: &str, credential: &str) -> Result<String> {
        debug!("Requesting a token for `{principal}` from {}", self.url);

        let response = self
            .http
            .get(self.url.clone())
            .basic_auth(principal, Some(credential))
            .send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::new(
                ErrorKind::Authorization,
                format!("The principal `{principal}` has not been authorized"),
            )
            .status(status.as_u16()));
        }

        let token = response
            .headers()
            .get(JWT_HEADER)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::Authorization,
                    format!("The response does not contain the `{JWT_HEADER}` header"),
                )
            })?
            .to_str()
            .map_err(|e| {
                Error::new(
                    ErrorKind::Authorization,
                    format!("The `{JWT_HEADER}` header is not a valid token: {e}"),
                )
            })?;

        Ok(token.to_owned())
    }
}

impl Authorizer for JwtAuthorizer {
    fn authorize(&self, principal: &str, credential: &str) -> Result<String> {
        self.request_token(principal, credential)
            .map_err(|e| e.context(Operation::Authorize, Some(&self.url)))
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    use crate::error::{Error, ErrorKind};
    use crate::request::Operation;
    use crate::tests::MockService;

    use super::{Authorizer, Credentials, JWT_HEADER, JwtAuthorizer, StaticToken};

    // Basic authentication of `admin:password`.
    const ADMIN_BASIC_AUTH: &str = "Basic YWRtaW46cGFzc3dvcmQ=";

    #[test]
    fn default_credentials() {
        let credentials = Credentials::default();

        assert_eq!(credentials.principal(), "admin");
        assert_eq!(credentials.credential(), "password");
        assert!(!format!("{credentials:?}").contains("password"));
    }

    #[test]
    fn static_token() {
        let authorizer = StaticToken::new("secret");

        assert_eq!(authorizer.authorize("admin", "password"), Ok("secret".into()));
        assert!(!format!("{authorizer:?}").contains("secret"));
    }

    #[test]
    fn closure_authorizer() {
        let authorizer = |principal: &str, credential: &str| -> Result<String, Error> {
            Ok(format!("{principal}-{credential}"))
        };

        assert_eq!(
            Authorizer::authorize(&authorizer, "user", "pass"),
            Ok("user-pass".into())
        );
    }

    #[test]
    fn jwt_url() {
        let base_url = Url::parse("http://localhost:8080/").unwrap();
        let authorizer = JwtAuthorizer::new(&base_url).unwrap();

        assert_eq!(
            authorizer.url().as_str(),
            "http://localhost:8080/sitewhere/authapi/jwt"
        );
    }

    #[test]
    fn jwt_issued() {
        let service = MockService::start();
        service.mount(
            Mock::given(method("GET"))
                .and(path("/sitewhere/authapi/jwt"))
                .and(header("authorization", ADMIN_BASIC_AUTH))
                .respond_with(ResponseTemplate::new(200).insert_header(JWT_HEADER, "eyJ.jwt"))
                .expect(1),
        );

        let authorizer = JwtAuthorizer::new(&service.url()).unwrap();

        assert_eq!(authorizer.authorize("admin", "password"), Ok("eyJ.jwt".into()));
    }

    #[test]
    fn jwt_refused() {
        let service = MockService::start();
        service.mount(
            Mock::given(method("GET"))
                .and(path("/sitewhere/authapi/jwt"))
                .respond_with(ResponseTemplate::new(401)),
        );

        let authorizer = JwtAuthorizer::new(&service.url()).unwrap();
        let error = authorizer.authorize("admin", "wrong").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Authorization);
        assert_eq!(error.status_code(), Some(401));
        assert_eq!(error.operation(), Some(Operation::Authorize));
        assert_eq!(error.url(), Some(authorizer.url().as_str()));
    }

    #[test]
    fn jwt_header_missing() {
        let service = MockService::start();
        service.mount(
            Mock::given(method("GET"))
                .and(path("/sitewhere/authapi/jwt"))
                .respond_with(ResponseTemplate::new(200)),
        );

        let authorizer = JwtAuthorizer::new(&service.url()).unwrap();
        let error = authorizer.authorize("admin", "password").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Authorization);
        assert_eq!(error.status_code(), None);
    }
}
