use url::Url;

use crate::config::BackendConfig;

use super::ContactMessage;
#[cfg(target_arch = "wasm32")]
use super::MessageStore;
use super::StoreError;

/// An insert into the backend's REST interface, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertRequest {
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl InsertRequest {
    pub fn new(config: &BackendConfig, message: &ContactMessage) -> Result<Self, StoreError> {
        let mut url = config.url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Encode(format!("{} can't have a path", config.url)))?
            .pop_if_empty()
            .extend(["rest", "v1", config.table.as_str()]);

        let body = serde_json::to_string(message).map_err(|e| StoreError::Encode(e.to_string()))?;

        Ok(Self {
            url,
            headers: vec![
                ("apikey", config.anon_key.clone()),
                ("Authorization", format!("Bearer {}", config.anon_key)),
                ("Content-Type", "application/json".to_owned()),
                // We never read the row back.
                ("Prefer", "return=minimal".to_owned()),
            ],
            body,
        })
    }
}

/// Writes messages with a single `fetch` to the backend's REST endpoint.
#[cfg(target_arch = "wasm32")]
pub struct RestStore {
    config: BackendConfig,
}

#[cfg(target_arch = "wasm32")]
impl RestStore {
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }
}

#[cfg(target_arch = "wasm32")]
impl MessageStore for RestStore {
    async fn insert(&self, message: &ContactMessage) -> Result<(), StoreError> {
        use gloo_net::http::Request;

        let InsertRequest { url, headers, body } = InsertRequest::new(&self.config, message)?;

        let mut builder = Request::post(url.as_str());
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }

        let response = builder
            .body(body)
            .map_err(|e| StoreError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(StoreError::Rejected {
                status: response.status(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hi".into(),
            message: "Hello there".into(),
        }
    }

    #[test]
    fn posts_to_the_table_endpoint() {
        let config = BackendConfig::new("https://abc.supabase.co", "anon").unwrap();
        let request = InsertRequest::new(&config, &message()).unwrap();

        assert_eq!(
            request.url.as_str(),
            "https://abc.supabase.co/rest/v1/contact_messages"
        );
        assert!(request.headers.contains(&("apikey", "anon".to_owned())));
        assert!(request
            .headers
            .contains(&("Authorization", "Bearer anon".to_owned())));
        assert!(request
            .headers
            .contains(&("Prefer", "return=minimal".to_owned())));

        let body: ContactMessage = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body, message());
    }

    #[test]
    fn keeps_a_base_path() {
        let mut config = BackendConfig::new("https://example.com/db/", "anon").unwrap();
        config.table = "inbox".into();
        let request = InsertRequest::new(&config, &message()).unwrap();

        assert_eq!(request.url.as_str(), "https://example.com/db/rest/v1/inbox");
    }
}
