//! A http client for the knowledge-base service
//!
//! Provides a http client based on reqwest. Every method sends
//! exactly one request and hands back the status code and body as
//! they were received.
//!
//! # Usage
//!
//! ```rust,no_run
//! use kb_cli::data::base_url::BaseUrl;
//! use kb_cli::httpclient;
//! let base = BaseUrl::parse("http://localhost:3001").unwrap();
//! let client = httpclient::Client::new(base).unwrap();
//! async {
//!   println!("{:?}", client.get_question(42).await);
//! };
//! ```

pub mod data;
pub mod request;

use self::data::*;
use self::request::RequestSpec;
use crate::data::base_url::BaseUrl;
use crate::session::SessionToken;
use reqwest::header::COOKIE;
use reqwest::ClientBuilder;
use snafu::{ResultExt, Snafu};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("An error was received from {}: {}", url, source))]
    Http { source: reqwest::Error, url: String },

    #[snafu(display("An error occurred creating the http client: {}", source))]
    ClientCreate { source: reqwest::Error },

    #[snafu(display("An error occured reading the response: {}", source))]
    ReadResp { source: reqwest::Error },
}

/// The knowledge-base http client.
///
/// This wraps a reqwest client with methods corresonding to the
/// service endpoints.
pub struct Client {
    client: reqwest::Client,
    base_url: BaseUrl,
    cookie_name: String,
}

impl Client {
    pub fn new(base_url: BaseUrl) -> Result<Client, Error> {
        Client::with_cookie_name(base_url, request::DEFAULT_COOKIE_NAME)
    }

    pub fn with_cookie_name<S: Into<String>>(
        base_url: BaseUrl,
        cookie_name: S,
    ) -> Result<Client, Error> {
        log::debug!("Create knowledge-base client for: {}", base_url);
        let client = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .build()
            .context(ClientCreateSnafu)?;
        Ok(Client {
            client,
            base_url,
            cookie_name: cookie_name.into(),
        })
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Sends the request and reads the whole body as text. No
    /// timeout is set, the call waits as long as the server does.
    pub async fn execute(&self, spec: &RequestSpec) -> Result<ApiResponse, Error> {
        let resp = self.send(spec).await?;
        let status = resp.status().as_u16();
        let body = resp.text().await.context(ReadRespSnafu)?;
        log::debug!("{} {} -> {}: {}", spec.method, spec.url, status, body);
        Ok(ApiResponse { status, body })
    }

    async fn send(&self, spec: &RequestSpec) -> Result<reqwest::Response, Error> {
        let url = spec.url.as_str();
        log::debug!("Sending {} {}", spec.method, url);
        let mut req = self.client.request(spec.method.clone(), spec.url.clone());
        if let Some(body) = &spec.json_body {
            req = req.json(body);
        }
        if let Some(cookies) = spec.cookie_header() {
            log::debug!("Attaching {} cookie(s)", spec.cookies.len());
            req = req.header(COOKIE, cookies);
        }
        req.send().await.context(HttpSnafu { url })
    }

    /// Fetches a single question.
    pub async fn get_question(&self, id: i64) -> Result<ApiResponse, Error> {
        self.execute(&request::get_question(&self.base_url, id))
            .await
    }

    /// Logs in. Next to the response, the session cookie set by the
    /// service is returned, if there is one.
    pub async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<(ApiResponse, Option<SessionToken>), Error> {
        let spec = request::login(&self.base_url, credentials);
        let resp = self.send(&spec).await?;
        let session = resp
            .cookies()
            .find(|c| c.name() == self.cookie_name)
            .map(|c| SessionToken::new(c.value()));
        let status = resp.status().as_u16();
        let body = resp.text().await.context(ReadRespSnafu)?;
        log::debug!("POST {} -> {}: {}", spec.url, status, body);
        Ok((ApiResponse { status, body }, session))
    }

    pub async fn submit_question(
        &self,
        question: &NewQuestion,
        route: Option<&TeamRoute>,
        session: Option<&SessionToken>,
    ) -> Result<ApiResponse, Error> {
        let spec =
            request::submit_question(&self.base_url, question, route, &self.cookie_name, session);
        self.execute(&spec).await
    }

    /// Creates a new user account.
    pub async fn signup(&self, user: &NewUser) -> Result<ApiResponse, Error> {
        self.execute(&request::signup(&self.base_url, user)).await
    }

    pub async fn get_questions(&self, author: Option<i64>) -> Result<ApiResponse, Error> {
        self.execute(&request::get_questions(&self.base_url, author))
            .await
    }

    pub async fn get_answers(&self, question_id: i64) -> Result<ApiResponse, Error> {
        self.execute(&request::get_answers(&self.base_url, question_id))
            .await
    }

    pub async fn submit_answer(
        &self,
        question_id: i64,
        content: &str,
        session: Option<&SessionToken>,
    ) -> Result<ApiResponse, Error> {
        let spec = request::submit_answer(
            &self.base_url,
            question_id,
            content,
            &self.cookie_name,
            session,
        );
        self.execute(&spec).await
    }

    pub async fn logout(&self, session: &SessionToken) -> Result<ApiResponse, Error> {
        self.execute(&request::logout(&self.base_url, &self.cookie_name, session))
            .await
    }
}
