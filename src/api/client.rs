//! HTTP client for backend requests.
//!
//! This module provides a low-level wrapper around `reqwest` that attaches
//! authentication, checks the response status and decodes JSON bodies.

use super::ApiError;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::{de::DeserializeOwned, Serialize};

/// Makes requests to the backend and conforms response data to given types.
///
#[derive(Clone)]
pub struct Client {
    access_token: String,
    base_url: Url,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given access token and base URL.
    ///
    pub fn new(access_token: &str, base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: String::from("not a base URL"),
            });
        }
        Ok(Client {
            access_token: access_token.to_owned(),
            base_url,
            http_client: reqwest::Client::builder().build()?,
        })
    }

    /// Append `segments` to the base URL. Each segment is percent-encoded, so
    /// IDs containing `/`, `?` or `#` stay inside their own segment.
    ///
    pub fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: String::from("not a base URL"),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Return decoded body for a GET request or error.
    ///
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &[&str],
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)?.query(params)).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            log::error!(
                "Failed to deserialize response from '{}': {}. Response body: {}",
                path.join("/"),
                e,
                String::from_utf8_lossy(&bytes)
            );
            ApiError::Deserialization(e)
        })
    }

    /// Send a JSON body with PUT, ignoring the response body.
    ///
    pub async fn put<B: Serialize + ?Sized>(&self, path: &[&str], body: &B) -> Result<(), ApiError> {
        self.send(self.request(Method::PUT, path)?.json(body)).await?;
        Ok(())
    }

    /// Delete the resource at `path`.
    ///
    pub async fn delete(&self, path: &[&str]) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path)?).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &[&str]) -> Result<RequestBuilder, ApiError> {
        Ok(self
            .http_client
            .request(method, self.url(path)?)
            .bearer_auth(&self.access_token))
    }

    /// Make request and return the response, turning non-success statuses
    /// into errors carrying the server's message.
    ///
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("Unable to read response"));
        log::error!("API request failed with status {}: {}", status, body);
        Err(ApiError::from_response(status.as_u16(), &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_escapes_each_segment() {
        let client = Client::new("token", "https://hr.example.com/api/").unwrap();
        let url = client.url(&["departments", "a/b?c#d"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://hr.example.com/api/departments/a%2Fb%3Fc%23d"
        );

        let client = Client::new("token", "http://localhost:8080").unwrap();
        let url = client.url(&["org-units", "d1", "children"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/org-units/d1/children");
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(matches!(
            Client::new("token", "not a url"),
            Err(ApiError::InvalidUrl { .. })
        ));
        assert!(matches!(
            Client::new("token", "mailto:hr@example.com"),
            Err(ApiError::InvalidUrl { .. })
        ));
    }
}
