use crate::{
    common_dto::{PublicKeyJwkDTO, PublicKeyJwkEllipticDataDTO},
    common_models::{PublicKeyJwk, PublicKeyJwkEllipticData},
    did::{
        imp::dto::{DidDocumentDTO, DidVerificationMethodDTO},
        model::{DidDocument, DidVerificationMethod},
    },
};

impl From<PublicKeyJwkDTO> for PublicKeyJwk {
    fn from(value: PublicKeyJwkDTO) -> Self {
        match value {
            PublicKeyJwkDTO::Ec(value) => PublicKeyJwk::Ec(value.into()),
            PublicKeyJwkDTO::Okp(value) => PublicKeyJwk::Okp(value.into()),
            PublicKeyJwkDTO::Unsupported => PublicKeyJwk::Unsupported,
        }
    }
}

impl From<PublicKeyJwkEllipticDataDTO> for PublicKeyJwkEllipticData {
    fn from(value: PublicKeyJwkEllipticDataDTO) -> Self {
        Self {
            r#use: value.r#use,
            crv: value.crv,
            x: value.x,
            y: value.y,
        }
    }
}

impl From<DidDocumentDTO> for DidDocument {
    fn from(value: DidDocumentDTO) -> Self {
        Self {
            context: value.context,
            id: value.id,
            verification_method: value
                .verification_method
                .into_iter()
                .map(|v| v.into())
                .collect(),
            authentication: value.authentication,
            assertion_method: value.assertion_method,
            rest: value.rest,
        }
    }
}

impl From<DidVerificationMethodDTO> for DidVerificationMethod {
    fn from(value: DidVerificationMethodDTO) -> Self {
        Self {
            id: value.id,
            r#type: value.r#type,
            controller: value.controller,
            public_key_jwk: value.public_key_jwk.into(),
        }
    }
}
