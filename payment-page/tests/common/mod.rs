use payment_page::config::Settings;
use payment_page::startup::Application;
use serde_json::{json, Value};

pub const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Mobile Safari/537.36";
pub const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    /// Keeps the session cookie and does not follow redirects.
    pub client: reqwest::Client,
}

/// Settings for a test instance; `overrides` is merged over the defaults.
pub fn test_settings(overrides: Value) -> Settings {
    let mut settings = json!({
        "server": { "host": "127.0.0.1", "port": 0 },
        "payee": { "handle": "9981171354@ybl", "name": "Payment Receiver" },
        "channels": ["direct_link", "qr", "checkout"],
        "dispatch": { "reset_after_ms": 60000 },
        "checkout": { "key_id": "rzp_test_B4OLtt7MRHNxrW" }
    });
    merge(&mut settings, overrides);

    serde_json::from_value(settings).expect("Test settings should deserialize")
}

fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                merge(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, value) => *base = value,
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(json!({})).await
    }

    pub async fn spawn_with(overrides: Value) -> Self {
        let settings = test_settings(overrides);
        settings.check().expect("Test settings should be valid");
        Self::spawn_settings(settings).await
    }

    /// Start with settings that skip startup validation.
    pub async fn spawn_settings(settings: Settings) -> Self {
        let app = Application::build(settings)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        // Wait for the server by polling the health endpoint
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn page(&self, user_agent: &str) -> String {
        let response = self
            .client
            .get(self.url("/"))
            .header("User-Agent", user_agent)
            .send()
            .await
            .expect("Failed to execute request");
        assert!(response.status().is_success());
        response.text().await.expect("Failed to read page")
    }

    pub async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
        user_agent: &str,
    ) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header("User-Agent", user_agent)
            .form(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get("location")
        .expect("Response should redirect")
        .to_str()
        .expect("Location should be ASCII")
        .to_string()
}
