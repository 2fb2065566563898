//! Implementation of did:web.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::{
    common_models::did::DidValue,
    did::{
        error::DidMethodError,
        imp::dto::DidDocumentDTO,
        model::DidDocument,
        DidMethod,
    },
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    #[serde(default)]
    pub resolve_to_insecure_http: bool,
}

pub struct WebDidMethod {
    pub client: reqwest::Client,
    pub params: Params,
}

impl WebDidMethod {
    pub fn new(client: reqwest::Client, params: Params) -> Self {
        Self { client, params }
    }
}

#[async_trait]
impl DidMethod for WebDidMethod {
    async fn resolve(&self, did_value: &DidValue) -> Result<DidDocument, DidMethodError> {
        let url = did_value_to_url(did_value, self.params.resolve_to_insecure_http)?;

        let document = fetch_did_web_document(url, &self.client)
            .await?
            .ok_or_else(|| DidMethodError::NotFound(did_value.to_owned()))?;

        if &document.id != did_value {
            return Err(DidMethodError::ResolutionError(format!(
                "Document `{}` served for `{did_value}`",
                document.id
            )));
        }

        Ok(document.into())
    }
}

fn resolution_error(context: &str) -> impl Fn(reqwest::Error) -> DidMethodError + '_ {
    move |error| DidMethodError::ResolutionError(format!("{context}: {error}"))
}

async fn fetch_did_web_document(
    url: Url,
    client: &reqwest::Client,
) -> Result<Option<DidDocumentDTO>, DidMethodError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(resolution_error("Could not fetch did document"))?;

    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }

    response
        .error_for_status()
        .map_err(resolution_error("Could not fetch did document"))?
        .json()
        .await
        .map(Some)
        .map_err(resolution_error("Could not parse did document"))
}

/// `did:web:<host>[:<path>...]` to `https://<host>/<path>/did.json`, or to
/// `/.well-known/did.json` without path. A port is written as `%3A<port>`.
fn did_value_to_url(did_value: &DidValue, resolve_to_http: bool) -> Result<Url, DidMethodError> {
    let specific_id = did_value
        .as_str()
        .strip_prefix("did:web:")
        .ok_or_else(|| DidMethodError::ResolutionError("Incorrect did value".to_owned()))?;

    let (host, path) = match specific_id.split_once(':') {
        Some((host, path)) => (host, Some(path)),
        None => (specific_id, None),
    };
    if host.is_empty() {
        return Err(DidMethodError::ResolutionError(
            "Missing host part in a did value".to_owned(),
        ));
    }

    let scheme = if resolve_to_http { "http" } else { "https" };
    let mut url = Url::parse(&format!("{scheme}://{}", percent_decode(host)?))
        .map_err(|e| DidMethodError::ResolutionError(e.to_string()))?;

    let segments = match path {
        Some(path) => path
            .split(':')
            .map(percent_decode)
            .collect::<Result<Vec<_>, _>>()?,
        None => vec![".well-known".to_owned()],
    };

    url.path_segments_mut()
        .map_err(|_| DidMethodError::ResolutionError("Invalid host".to_owned()))?
        .extend(segments)
        .push("did.json");

    Ok(url)
}

fn percent_decode(value: &str) -> Result<String, DidMethodError> {
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| DidMethodError::ResolutionError(e.to_string()))
}
