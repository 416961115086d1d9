//! HTTP client for the message API.

use url::Url;

use crate::api::types::{MessagePage, PostMessageRequest};
use crate::error::{Error, Result};

/// HTTP client for the message API.
///
/// # Example
///
/// ```rust,no_run
/// use parlor::api::MessageApi;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let api = MessageApi::new("https://api.example.com/messages")?;
/// let page = api.fetch_page(None, 50).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MessageApi {
    base_url: Url,
    http: reqwest::Client,
}

impl MessageApi {
    /// Create a new client for the given API base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Fetch one page of messages.
    ///
    /// Passing `None` for `last_key` fetches the newest page; passing the
    /// `nextKey` of a previous page fetches the next-older one.
    pub async fn fetch_page(&self, last_key: Option<&str>, limit: u32) -> Result<MessagePage> {
        let mut request = self
            .http
            .get(self.base_url.clone())
            .query(&[("limit", limit.to_string())]);
        if let Some(key) = last_key {
            request = request.query(&[("lastKey", key)]);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Persist a new message.
    ///
    /// The API documents no response body beyond the success status.
    pub async fn post_message(&self, request: &PostMessageRequest) -> Result<()> {
        let response = self
            .http
            .post(self.base_url.clone())
            .json(request)
            .send()
            .await?;
        Self::ensure_success(response).await
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn ensure_success(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
