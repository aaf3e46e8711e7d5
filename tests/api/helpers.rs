use std::net::TcpListener;
use std::time::Duration;

use reqwest::{Client, Method, Response};

use serde::Serialize;

use url::Url;

use wiremock::MockServer;

use formrelay::app;
use formrelay::client::HttpRelay;
use formrelay::notify::{Dispatcher, Letterhead};

pub const OPERATOR: &str = "operator@cyberlex.test";
pub const SENDER: &str = "mailer@cyberlex.test";

pub struct TestApp {
    addr: String,

    pub client: Client,
    pub email_server: MockServer,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let email_server = MockServer::start().await;

        let dispatcher = {
            let api_base_url =
                Url::parse(&email_server.uri()).expect("Failed to parse mock server uri");
            let api_auth_token = "TestAuthorization"
                .parse()
                .expect("Failed to parse relay token");
            let api_timeout = Duration::from_secs(2);

            let relay = HttpRelay::new(api_timeout, api_base_url, api_auth_token)
                .expect("Failed to create mail relay");

            let letterhead = Letterhead {
                brand: "Cyberlex".into(),
                sender: SENDER.parse().expect("Failed to parse sender address"),
                operator: OPERATOR.parse().expect("Failed to parse operator address"),
            };

            Dispatcher::new(Box::new(relay), letterhead).expect("Failed to create dispatcher")
        };

        let server = app::run(listener, dispatcher).expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self {
            addr,
            client,
            email_server,
        }
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health_check").send().await
    }

    pub async fn contact(&self, body: &impl Serialize) -> reqwest::Result<Response> {
        self.request(Method::POST, "contact").json(body).send().await
    }

    pub async fn booking(&self, body: &impl Serialize) -> reqwest::Result<Response> {
        self.request(Method::POST, "booking").json(body).send().await
    }

    /// JSON bodies of every message handed to the relay, in order
    pub async fn sent_emails(&self) -> Vec<serde_json::Value> {
        self.email_server
            .received_requests()
            .await
            .expect("Request recording is disabled")
            .iter()
            .map(|req| serde_json::from_slice(&req.body).expect("Relay body is not JSON"))
            .collect()
    }
}

pub async fn json_body(res: Response) -> serde_json::Value {
    res.json().await.expect("Response body is not JSON")
}

pub fn assert_cors_headers(res: &Response) {
    let headers = res.headers();
    let header = |name: &str| {
        headers
            .get(name)
            .unwrap_or_else(|| panic!("missing {} header", name))
            .to_str()
            .unwrap()
            .to_string()
    };

    assert_eq!("*", header("access-control-allow-origin"));
    assert_eq!("true", header("access-control-allow-credentials"));
    assert_eq!(
        "GET,OPTIONS,PATCH,DELETE,POST,PUT",
        header("access-control-allow-methods")
    );
    assert_eq!(
        "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, Content-MD5, Content-Type, Date, X-Api-Version",
        header("access-control-allow-headers")
    );
}
