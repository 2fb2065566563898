use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};
use ed25519_compact::KeyPair;
use zeroize::Zeroizing;

use crate::{
    common_models::{PublicKeyJwk, PublicKeyJwkEllipticData},
    key_algorithm::{error::KeyAlgorithmError, model::GeneratedKey, KeyAlgorithm},
};


pub struct Eddsa;

impl KeyAlgorithm for Eddsa {
    fn get_signer_algorithm_id(&self) -> String {
        "Ed25519".to_string()
    }

    fn get_jose_algorithm(&self) -> String {
        "EdDSA".to_string()
    }

    fn generate_key_pair(&self) -> GeneratedKey {
        let key_pair = KeyPair::generate();

        GeneratedKey {
            public: key_pair.pk.to_vec(),
            private: Zeroizing::new(key_pair.sk.to_vec()),
        }
    }

    fn bytes_to_jwk(
        &self,
        bytes: &[u8],
        r#use: Option<String>,
    ) -> Result<PublicKeyJwk, KeyAlgorithmError> {
        Ok(PublicKeyJwk::Okp(PublicKeyJwkEllipticData {
            r#use,
            crv: "Ed25519".to_string(),
            x: Base64UrlSafeNoPadding::encode_to_string(bytes)
                .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))?,
            y: None,
        }))
    }

    fn jwk_to_bytes(&self, jwk: &PublicKeyJwk) -> Result<Vec<u8>, KeyAlgorithmError> {
        match jwk {
            PublicKeyJwk::Okp(data) if data.crv == "Ed25519" => {
                Base64UrlSafeNoPadding::decode_to_vec(&data.x, None)
                    .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))
            }
            _ => Err(KeyAlgorithmError::Failed("invalid kty".to_string())),
        }
    }
}
