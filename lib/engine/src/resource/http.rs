use super::prelude::{Error, Resource, SearchFilter, SearchOptions, Session};
use cartouche_prelude::{OneOrMany, TemplateData};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::borrow::Cow;
use std::collections::BTreeMap;
use url::Url;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Config {
    pub url: String,
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Config {
    pub fn build(&self) -> Result<HttpResourceClient, Error> {
        tracing::debug!("building http resource client for {}", self.url);
        let headers = self
            .headers
            .iter()
            .map(|(name, value)| {
                let name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
                    tracing::error!("invalid header name {:?}: {:?}", name, err);
                    Error::Configuration(Cow::Owned(format!("invalid header name {name:?}")))
                })?;
                let value = HeaderValue::from_str(value).map_err(|err| {
                    tracing::error!("invalid header value for {:?}: {:?}", name, err);
                    Error::Configuration(Cow::Owned(format!("invalid header value for {name}")))
                })?;
                Ok((name, value))
            })
            .collect::<Result<HeaderMap, Error>>()?;
        Ok(HttpResourceClient {
            client: reqwest::Client::new(),
            url: self.url.clone(),
            params: self
                .params
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            headers,
        })
    }
}

#[derive(Debug, Default, serde::Deserialize)]
struct ResourceListBody {
    #[serde(rename = "Resource", default)]
    resources: OneOrMany<Resource>,
}

// an empty result comes back as `{"ResourceList": ""}`
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum ResourceList {
    Filled(ResourceListBody),
    Empty(String),
}

#[derive(Debug, serde::Deserialize)]
struct SearchResponse {
    #[serde(rename = "ResourceList", default)]
    list: Option<ResourceList>,
}

#[derive(Clone, Debug)]
pub struct HttpResourceClient {
    client: reqwest::Client,
    url: String,
    params: Vec<(String, String)>,
    headers: HeaderMap,
}

impl HttpResourceClient {
    #[cfg(test)]
    pub(crate) fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            params: Default::default(),
            headers: Default::default(),
        }
    }

    fn interpolate(&self, path: &str) -> String {
        if self.url.ends_with('/') {
            format!("{}{}", self.url, path)
        } else {
            format!("{}/{}", self.url, path)
        }
    }

    fn build_url<I, K>(&self, path: &str, extra: I) -> Result<Url, Error>
    where
        I: IntoIterator<Item = (K, String)>,
        K: Into<String>,
    {
        let base_url = self.interpolate(path);
        let params: Vec<(String, String)> = self
            .params
            .iter()
            .cloned()
            .chain(extra.into_iter().map(|(key, value)| (key.into(), value)))
            .collect();
        Url::parse_with_params(base_url.as_str(), params.iter()).map_err(|err| {
            tracing::error!("unable to build resource url: {:?}", err);
            Error::Configuration(Cow::Owned(format!("unable to build url for {path}")))
        })
    }

    fn headers(&self, session: &Session) -> Result<HeaderMap, Error> {
        let mut headers = self.headers.clone();
        if let Some(ref value) = session.authorization {
            let value = HeaderValue::from_str(value).map_err(|err| {
                tracing::debug!("invalid authorization header: {:?}", err);
                Error::Configuration(Cow::Borrowed("invalid authorization header"))
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        let res = request.send().await.map_err(|err| {
            tracing::error!("unable to execute request: {:?}", err);
            Error::Transport(err.to_string())
        })?;
        let status = res.status();
        if status.is_success() {
            Ok(res)
        } else {
            tracing::error!("resource api answered with status {}", status);
            Err(Error::status(
                status.as_u16(),
                Cow::Owned(
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string(),
                ),
            ))
        }
    }

    pub(super) async fn search(
        &self,
        filter: &SearchFilter,
        options: &SearchOptions,
        session: &Session,
    ) -> Result<Vec<Resource>, Error> {
        tracing::debug!("searching resources {:?}", filter.ids);
        let url = self.build_url("resources/search/list", options.params())?;
        let request = self
            .client
            .post(url)
            .headers(self.headers(session)?)
            .json(filter);
        let res = self.send(request).await?;
        let body: SearchResponse = res.json().await.map_err(|err| {
            tracing::error!("unable to parse resource list: {:?}", err);
            Error::Decoding(err.to_string())
        })?;
        Ok(match body.list {
            Some(ResourceList::Filled(inner)) => inner.resources.into_vec(),
            Some(ResourceList::Empty(_)) | None => Vec::new(),
        })
    }

    pub(super) async fn get_data(&self, id: &str, session: &Session) -> Result<TemplateData, Error> {
        tracing::debug!("loading data of resource {}", id);
        let url = self.build_url(&format!("data/{id}"), std::iter::empty::<(&str, String)>())?;
        let request = self.client.get(url).headers(self.headers(session)?);
        let res = self.send(request).await?;
        let is_json = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map_or(false, |value| value.contains("json"));
        if is_json {
            res.json::<serde_json::Value>()
                .await
                .map(TemplateData::Structured)
                .map_err(|err| {
                    tracing::error!("unable to parse resource data: {:?}", err);
                    Error::Decoding(err.to_string())
                })
        } else {
            res.text().await.map(TemplateData::Text).map_err(|err| {
                tracing::error!("unable to read resource data: {:?}", err);
                Error::Decoding(err.to_string())
            })
        }
    }
}
