use crate::api::error::RequestError;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Query parameters with map semantics: one value per key, `None` values are
/// left out of the URL entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, Option<String>>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.0.insert(key.to_string(), Some(value.to_string()));
        self
    }

    #[must_use]
    pub fn with_opt<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        self.0
            .insert(key.to_string(), value.map(|value| value.to_string()));
        self
    }

    /// Entries that will reach the query string.
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(key, value)| Some((key.as_str(), value.as_deref()?)))
    }

    fn overrides(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(Option::is_some)
    }
}

/// Thin JSON/multipart client bound to one backend base address.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, RequestError> {
        let base = Url::parse(base_url).map_err(|e| RequestError::InvalidUrl {
            path: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|source| RequestError::Network {
            url: base_url.to_string(),
            source,
        })?;

        Ok(Self { http, base })
    }

    /// Resolves `path` against the base address unless it is already an
    /// absolute URL, then appends every present parameter exactly once.
    pub fn build_url(&self, path: &str, params: Option<&Params>) -> Result<Url, RequestError> {
        let mut url = match Url::parse(path) {
            Ok(url) if url.has_host() => url,
            _ => self.base.join(path).map_err(|e| RequestError::InvalidUrl {
                path: path.to_string(),
                reason: e.to_string(),
            })?,
        };

        let Some(params) = params else {
            return Ok(url);
        };

        // Parameters replace same-named keys already present on the path
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| !params.overrides(key))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        let added: Vec<(&str, &str)> = params.present().collect();

        url.set_query(None);
        if !kept.is_empty() || !added.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &kept {
                pairs.append_pair(key, value);
            }
            for (key, value) in added {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&Params>,
    ) -> Result<T, RequestError> {
        let url = self.build_url(path, params)?;
        let request = self.http.get(url.clone());
        self.send_json(&url, request).await
    }

    pub async fn post_json<B, T>(
        &self,
        path: &str,
        params: Option<&Params>,
        body: Option<&B>,
    ) -> Result<T, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(path, params)?;
        let request = self.http.post(url.clone());
        let request = match body {
            Some(body) => request.json(body),
            None => request.header(CONTENT_TYPE, "application/json"),
        };
        self.send_json(&url, request).await
    }

    /// The multipart boundary header is set by reqwest from the form.
    pub async fn post_form_data<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&Params>,
        form: Form,
    ) -> Result<T, RequestError> {
        let url = self.build_url(path, params)?;
        let request = self.http.post(url.clone()).multipart(form);
        self.send_json(&url, request).await
    }

    pub async fn get_bytes(
        &self,
        path: &str,
        params: Option<&Params>,
    ) -> Result<Vec<u8>, RequestError> {
        let url = self.build_url(path, params)?;
        let response = self.send(&url, self.http.get(url.clone())).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| RequestError::Network {
                url: url.to_string(),
                source,
            })?;
        Ok(bytes.to_vec())
    }

    async fn send(&self, url: &Url, request: RequestBuilder) -> Result<Response, RequestError> {
        debug!("sending request to {url}");
        let response = request
            .send()
            .await
            .map_err(|source| RequestError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        request: RequestBuilder,
    ) -> Result<T, RequestError> {
        let response = self.send(url, request).await?;
        let body = response
            .text()
            .await
            .map_err(|source| RequestError::Network {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_str(&body).map_err(|e| RequestError::parse(url.as_str(), e.to_string()))
    }
}
