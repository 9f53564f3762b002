//! Construction of the requests sent to the knowledge-base service.
//!
//! A [`RequestSpec`] is a plain description of one http call. It is
//! built without any I/O and only turned into a reqwest request when
//! it is sent.

use super::data::{Credentials, NewQuestion, NewUser, TeamRoute};
use crate::data::base_url::BaseUrl;
use crate::session::SessionToken;
use reqwest::{Method, Url};
use serde_json::{json, Map, Value};

pub const DEFAULT_COOKIE_NAME: &str = "knowledge_base";

#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    pub url: Url,
    pub json_body: Option<Value>,
    pub cookies: Vec<(String, String)>,
}

impl RequestSpec {
    fn new(method: Method, url: Url) -> RequestSpec {
        RequestSpec {
            method,
            url,
            json_body: None,
            cookies: Vec::new(),
        }
    }

    fn with_body(mut self, body: Value) -> RequestSpec {
        self.json_body = Some(body);
        self
    }

    fn with_session(mut self, cookie_name: &str, session: Option<&SessionToken>) -> RequestSpec {
        if let Some(token) = session {
            self.cookies
                .push((cookie_name.to_string(), token.as_str().to_string()));
        }
        self
    }

    /// The value for the `Cookie` header, if any cookie is set.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            None
        } else {
            let pairs: Vec<String> = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            Some(pairs.join("; "))
        }
    }
}

pub fn get_question(base: &BaseUrl, id: i64) -> RequestSpec {
    let id = id.to_string();
    RequestSpec::new(Method::GET, base.endpoint(&["questions", id.as_str()]))
}

pub fn login(base: &BaseUrl, credentials: &Credentials) -> RequestSpec {
    let body = json!({
        "username": credentials.username,
        "password": credentials.password,
    });
    RequestSpec::new(Method::POST, base.endpoint(&["login"])).with_body(body)
}

pub fn signup(base: &BaseUrl, user: &NewUser) -> RequestSpec {
    let mut body = Map::new();
    body.insert("username".into(), json!(user.username));
    body.insert("password".into(), json!(user.password));
    let optional = [
        ("email", &user.email),
        ("first_name", &user.first_name),
        ("last_name", &user.last_name),
    ];
    for (key, value) in optional {
        if let Some(v) = value {
            body.insert(key.into(), json!(v));
        }
    }
    RequestSpec::new(Method::POST, base.endpoint(&["users"])).with_body(Value::Object(body))
}

/// Lists the public questions, optionally only those of one author.
pub fn get_questions(base: &BaseUrl, author: Option<i64>) -> RequestSpec {
    let query: Vec<(&str, String)> = author.map(|a| ("user", a.to_string())).into_iter().collect();
    RequestSpec::new(Method::GET, base.endpoint_with_query(&["questions"], &query))
}

/// Submits a question, either publicly or to a team when `route` is
/// given. The session cookie is attached when present.
pub fn submit_question(
    base: &BaseUrl,
    question: &NewQuestion,
    route: Option<&TeamRoute>,
    cookie_name: &str,
    session: Option<&SessionToken>,
) -> RequestSpec {
    let url = match route {
        Some(TeamRoute { organization, team }) => base.endpoint(&[
            "organizations",
            organization.as_str(),
            "teams",
            team.as_str(),
            "questions",
        ]),
        None => base.endpoint(&["questions"]),
    };
    let body = json!({
        "author": question.author,
        "title": question.title,
        "content": question.content,
    });
    RequestSpec::new(Method::POST, url)
        .with_body(body)
        .with_session(cookie_name, session)
}

pub fn get_answers(base: &BaseUrl, question_id: i64) -> RequestSpec {
    let id = question_id.to_string();
    RequestSpec::new(
        Method::GET,
        base.endpoint(&["questions", id.as_str(), "answers"]),
    )
}

/// Answers a question. The service takes the author from the session.
pub fn submit_answer(
    base: &BaseUrl,
    question_id: i64,
    content: &str,
    cookie_name: &str,
    session: Option<&SessionToken>,
) -> RequestSpec {
    let id = question_id.to_string();
    RequestSpec::new(
        Method::POST,
        base.endpoint(&["questions", id.as_str(), "answers"]),
    )
    .with_body(json!({ "content": content }))
    .with_session(cookie_name, session)
}

pub fn logout(base: &BaseUrl, cookie_name: &str, session: &SessionToken) -> RequestSpec {
    RequestSpec::new(Method::POST, base.endpoint(&["logout"]))
        .with_session(cookie_name, Some(session))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BaseUrl {
        BaseUrl::parse("http://localhost:3001").unwrap()
    }

    #[test]
    fn get_question_has_no_body_or_cookie() {
        let req = get_question(&base(), 42);
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.as_str(), "http://localhost:3001/questions/42");
        assert_eq!(req.json_body, None);
        assert!(req.cookies.is_empty());
        assert_eq!(req.cookie_header(), None);
    }

    #[test]
    fn login_sends_credentials() {
        let creds = Credentials {
            username: "alice".into(),
            password: "secret".into(),
        };
        let req = login(&base(), &creds);
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.url.as_str(), "http://localhost:3001/login");
        assert_eq!(
            req.json_body,
            Some(json!({"username": "alice", "password": "secret"}))
        );
        assert!(req.cookies.is_empty());
    }

    fn question() -> NewQuestion {
        NewQuestion {
            author: 7,
            title: "Title".into(),
            content: "Body".into(),
        }
    }

    #[test]
    fn submit_without_session() {
        let req = submit_question(&base(), &question(), None, DEFAULT_COOKIE_NAME, None);
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.url.as_str(), "http://localhost:3001/questions");
        assert_eq!(
            req.json_body,
            Some(json!({"author": 7, "title": "Title", "content": "Body"}))
        );
        assert_eq!(req.cookie_header(), None);
    }

    #[test]
    fn submit_with_session_attaches_cookie() {
        let token = SessionToken::parse("abc123\n").unwrap();
        let req = submit_question(&base(), &question(), None, DEFAULT_COOKIE_NAME, Some(&token));
        assert_eq!(req.url.as_str(), "http://localhost:3001/questions");
        assert_eq!(
            req.cookie_header().as_deref(),
            Some("knowledge_base=abc123")
        );
    }

    #[test]
    fn submit_to_team() {
        let token = SessionToken::new("abc123");
        let route = TeamRoute {
            organization: "orgY".into(),
            team: "teamX".into(),
        };
        let req = submit_question(
            &base(),
            &question(),
            Some(&route),
            DEFAULT_COOKIE_NAME,
            Some(&token),
        );
        assert_eq!(
            req.url.as_str(),
            "http://localhost:3001/organizations/orgY/teams/teamX/questions"
        );
        assert_eq!(
            req.cookies,
            vec![("knowledge_base".to_string(), "abc123".to_string())]
        );
    }

    #[test]
    fn logout_uses_custom_cookie_name() {
        let token = SessionToken::new("t0k");
        let req = logout(&base(), "kb", &token);
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.url.as_str(), "http://localhost:3001/logout");
        assert_eq!(req.json_body, None);
        assert_eq!(req.cookie_header().as_deref(), Some("kb=t0k"));
    }

    #[test]
    fn signup_leaves_out_missing_fields() {
        let user = NewUser {
            username: "bob".into(),
            password: "pw".into(),
            email: Some("bob@example.com".into()),
            first_name: None,
            last_name: None,
        };
        let req = signup(&base(), &user);
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.url.as_str(), "http://localhost:3001/users");
        assert_eq!(
            req.json_body,
            Some(json!({"username": "bob", "password": "pw", "email": "bob@example.com"}))
        );
        assert!(req.cookies.is_empty());
    }

    #[test]
    fn get_questions_filters_by_author() {
        let req = get_questions(&base(), None);
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.as_str(), "http://localhost:3001/questions");

        let req = get_questions(&base(), Some(3));
        assert_eq!(req.url.as_str(), "http://localhost:3001/questions?user=3");
        assert_eq!(req.json_body, None);
    }

    #[test]
    fn answers_of_a_question() {
        let req = get_answers(&base(), 9);
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.as_str(), "http://localhost:3001/questions/9/answers");

        let token = SessionToken::new("abc123");
        let req = submit_answer(&base(), 9, "Use a mutex", DEFAULT_COOKIE_NAME, Some(&token));
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.url.as_str(), "http://localhost:3001/questions/9/answers");
        assert_eq!(req.json_body, Some(json!({"content": "Use a mutex"})));
        assert_eq!(
            req.cookie_header().as_deref(),
            Some("knowledge_base=abc123")
        );
    }
}
