use serde::{Deserialize, Serialize};
use serde_with::{formats::PreferMany, serde_as, OneOrMany};

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VPContent {
    #[serde(rename = "@context")]
    #[serde_as(as = "OneOrMany<_, PreferMany>")]
    pub context: Vec<String>,
    #[serde(rename = "type")]
    #[serde_as(as = "OneOrMany<_, PreferMany>")]
    pub r#type: Vec<String>,
    pub holder: String,
    #[serde(default)]
    #[serde_as(as = "OneOrMany<_, PreferMany>")]
    pub verifiable_credential: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VP {
    pub vp: VPContent,
}
