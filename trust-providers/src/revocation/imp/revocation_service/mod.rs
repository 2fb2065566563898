//! Client of the revocation service that maintains the status lists.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    credential_formatter::model::CredentialStatus,
    revocation::{
        error::RevocationError, model::CredentialRevocationState, RevocationMethod,
    },
};

#[cfg(test)]
mod test;

const VERIFY_PATH: &str = "api/v1/revocations/credentials/verify";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub url: Url,
}

pub struct RevocationServiceClient {
    client: reqwest::Client,
    params: Params,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequestDTO<'a> {
    credential_status: &'a CredentialStatus,
}

#[derive(Deserialize)]
struct VerifyResponseDTO {
    status: String,
}

impl RevocationServiceClient {
    pub fn new(client: reqwest::Client, mut params: Params) -> Self {
        // endpoint paths are joined relative to the configured base
        if !params.url.path().ends_with('/') {
            let path = format!("{}/", params.url.path());
            params.url.set_path(&path);
        }

        Self { client, params }
    }
}

#[async_trait::async_trait]
impl RevocationMethod for RevocationServiceClient {
    fn get_status_types(&self) -> Vec<String> {
        vec![
            "BitstringStatusListEntry".to_string(),
            "StatusList2021Entry".to_string(),
        ]
    }

    async fn check_credential_revocation_status(
        &self,
        credential_status: &CredentialStatus,
    ) -> Result<CredentialRevocationState, RevocationError> {
        let url = self.params.url.join(VERIFY_PATH)?;

        let response: VerifyResponseDTO = self
            .client
            .post(url)
            .json(&VerifyRequestDTO { credential_status })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match response.status.to_lowercase().as_str() {
            "active" => Ok(CredentialRevocationState::Active),
            "revoked" => Ok(CredentialRevocationState::Revoked),
            other => Err(RevocationError::UnexpectedStatus(other.to_owned())),
        }
    }
}
