// MAK Mobile HTTP client
//
// Wraps `reqwest::Client` with the service's four operations: Login,
// GrillsRead, GetAjaxGrillData, and SetGrillTemp. All requests are
// form-encoded POSTs; responses are JSON. The service never returns 401 —
// an expired or missing session shows up as a 302 redirect to the login
// page, which this client translates into session invalidation.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::models::{GrillId, GrillInfo, GrillListEntry, GrillListPage};
use crate::session::Session;
use crate::transport::TransportConfig;

/// Production base URL of the MAK Mobile service.
pub const DEFAULT_BASE_URL: &str = "http://makgrillsmobile.com/";

/// Raw client for the MAK Mobile service.
///
/// Owns the session cookie jar (inside the `reqwest::Client`) and the
/// authenticated flag. Every operation that requires a session performs
/// a login first if the flag is clear; login attempts are serialized.
pub struct GrillClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
    session: Session,
}

impl GrillClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (session auth requires cookies).
    pub fn new(
        base_url: Url,
        username: impl Into<String>,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            username: username.into(),
            password,
            session: Session::default(),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// The client must not follow redirects, or session expiry becomes
    /// invisible. Intended for tests.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            http,
            base_url,
            username: username.into(),
            password,
            session: Session::default(),
        }
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Best-effort hint: do we currently hold a session believed valid?
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Forget the current session. The next operation logs in afresh.
    pub fn invalidate_session(&self) {
        self.session.invalidate();
    }

    // ── Authentication ───────────────────────────────────────────────

    /// Ensure a valid session exists, logging in if necessary.
    ///
    /// Returns `true` if a session is available afterwards. Only one
    /// login attempt runs at a time; concurrent callers block until the
    /// in-flight attempt completes and then observe its result.
    pub async fn ensure_authenticated(&self) -> bool {
        let _guard = self.session.login_guard().await;
        if self.session.is_authenticated() {
            return true;
        }
        match self.login().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "login attempt failed");
                false
            }
        }
    }

    /// Perform the login POST.
    ///
    /// The service answers a *successful* login with a redirect to the
    /// account home page (session cookies on the redirect response); a
    /// 200 means the login form was re-rendered, i.e. the credentials
    /// were rejected. Caller must hold the login lock.
    async fn login(&self) -> Result<(), Error> {
        let url = self.url("Home/Login")?;
        debug!(%url, "logging in");

        let resp = self
            .http
            .post(url)
            .form(&[
                ("Username", self.username.as_str()),
                ("Password", self.password.expose_secret()),
                ("RememberMe", "false"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if status.is_redirection() {
            self.session.mark_authenticated();
            debug!("login successful");
            Ok(())
        } else if status.is_success() {
            Err(Error::Authentication {
                message: "credentials rejected (login page re-rendered)".into(),
            })
        } else {
            Err(Error::Authentication {
                message: format!("login failed (HTTP {status})"),
            })
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Fetch the list of grills owned by the account.
    pub async fn list_grills(&self) -> Result<Vec<GrillListEntry>, Error> {
        self.require_session().await?;

        let url = self.url("Home/GrillsRead")?;
        debug!(%url, "fetching grill list");

        let resp = self
            .http
            .post(url)
            .form(&[("group", ""), ("filter", ""), ("sort", "")])
            .send()
            .await?;

        let resp = self.check_session(resp)?;
        let page: GrillListPage = Self::decode(resp).await?;
        Ok(page.data)
    }

    /// Fetch the current reading for one grill.
    pub async fn grill_data(&self, grill_id: &GrillId) -> Result<GrillInfo, Error> {
        self.require_session().await?;

        let url = self.url(&format!("Grill/GetAjaxGrillData/{grill_id}"))?;
        debug!(%url, "fetching grill data");

        let resp = self.http.post(url).send().await?;
        let resp = self.check_session(resp)?;
        Self::decode(resp).await
    }

    /// Push a new setpoint to one grill.
    ///
    /// Returns the service's HTTP status. A redirect invalidates the
    /// session for subsequent calls but is still reported as this call's
    /// status — the caller decides whether the push counted as applied.
    pub async fn set_grill_temp(
        &self,
        grill_id: &GrillId,
        temperature: i64,
    ) -> Result<StatusCode, Error> {
        self.require_session().await?;

        let url = self.url(&format!("Grill/SetGrillTemp/{grill_id}"))?;
        debug!(%url, temperature, "setting grill temperature");

        let resp = self
            .http
            .post(url)
            .form(&[("SetPoint", temperature.to_string().as_str())])
            .send()
            .await?;

        let status = resp.status();
        if status.is_redirection() {
            self.session.invalidate();
        }
        Ok(status)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Establish a session if the hint says we don't have one.
    async fn require_session(&self) -> Result<(), Error> {
        if self.session.is_authenticated() {
            return Ok(());
        }
        if self.ensure_authenticated().await {
            Ok(())
        } else {
            Err(Error::Authentication {
                message: "unable to establish a session".into(),
            })
        }
    }

    /// Translate a redirect-to-login into session invalidation.
    fn check_session(&self, resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        if resp.status().is_redirection() {
            self.session.invalidate();
            return Err(Error::SessionExpired);
        }
        Ok(resp)
    }

    /// Decode a JSON response body, surfacing non-success statuses and
    /// keeping a body preview for deserialization failures.
    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: body_preview(&body).to_owned(),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = body_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }
}

/// First ~200 bytes of a response body, truncated on a char boundary.
fn body_preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn body_preview_never_splits_a_multibyte_char() {
        let body = format!("{}é and more", "x".repeat(199));
        let preview = body_preview(&body);
        assert_eq!(preview, "x".repeat(199));

        let short = "tout va bien";
        assert_eq!(body_preview(short), short);
    }
}
