//! The **trust core** lets organisational wallets authenticate to each other
//! with self-issued tokens and disclose verifiable credentials under a scope.
//!
//! A requesting wallet issues a self-issued ID token addressed to a partner.
//! The token embeds an access token listing the credential types the
//! requester wants to see. The partner validates the token, consumes it once
//! and answers with a Verifiable Presentation signed by its own key, either as
//! a JWT or as a JSON-LD document with a data-integrity proof.
//!
//! ## Repository structure
//!
//! The library consists of three crates:
//!
//! * **Crypto**: Ed25519 signatures, SHA-256 and random values.
//! * **Providers**
//!   * DID method provider (`did:web`)
//!   * Key algorithm and key storage providers
//!   * Key signer
//!   * Presentation formatter provider (JWT, JSON-LD)
//!   * Revocation method provider
//!   * Wallet, credential and replay storages
//!   * The self-issued token exchange protocol
//! * **Core**: services wiring the providers together.
//!
//! ## Getting started
//!
//! ```ignore rust
//! /// `None` initializes the core with the default configuration
//! let core = TrustCore::new(None, Storages::default(), reqwest::Client::new());
//!
//! let issued = core
//!     .token_service
//!     .issue_read_token(&requester, &partner, &["MembershipCredential"])
//!     .await?;
//!
//! // on the partner side
//! let presentation = core
//!     .presentation_service
//!     .request_presentation(&issued.token, true)
//!     .await?;
//! ```

use std::{collections::HashMap, sync::Arc};

use config::TrustCoreConfig;
use model::{CryptoAlgorithm, DidMethodType, KeyAlgorithmType, StorageType};
use service::{presentation_service::PresentationService, token_service::TokenService};
use time::Duration;
use trust_crypto::imp::{
    hasher::sha256::Sha256Hasher, signer::eddsa::Ed25519Signer, CryptoProviderImpl,
};
use trust_providers::{
    common_models::did::KeyRole,
    credential_formatter::imp::{
        json_ld::{JsonLdFormatter, Params as JsonLdParams},
        jwt_formatter::{JWTFormatter, Params as JWTParams},
        provider::CredentialFormatterProviderImpl,
    },
    did::imp::{
        provider::DidMethodProviderImpl,
        web::{Params as WebDidMethodParams, WebDidMethod},
    },
    exchange_protocol::self_issued::{
        issuer::TokenIssuer,
        presentation::{Params as PresentationGateParams, PresentationFormat, PresentationGate},
        replay::ReplayGuard,
        validator::{Params as ValidatorParams, TokenValidator},
    },
    key_algorithm::imp::{eddsa::Eddsa, provider::KeyAlgorithmProviderImpl},
    key_signer::{imp::KeySignerImpl, KeySigner},
    key_storage::{
        imp::{
            internal::{InternalKeyStorage, Params as InternalKeyStorageParams},
            provider::KeyProviderImpl,
        },
        KeyStorage,
    },
    revocation::{
        imp::{
            provider::RevocationMethodProviderImpl,
            revocation_service::{Params as RevocationServiceParams, RevocationServiceClient},
        },
        provider::RevocationMethodProvider,
    },
    storage::{
        credential::CredentialStorage,
        in_memory::{InMemoryCredentialStorage, InMemoryReplayStorage, InMemoryWalletStorage},
        replay::ReplayStorage,
        wallet::WalletStorage,
    },
    util::key_verification::KeyVerification,
};

pub mod config;
pub mod model;
pub mod service;

/// Persistence backends used by the core.
#[derive(Clone)]
pub struct Storages {
    pub wallet: Arc<dyn WalletStorage>,
    pub credential: Arc<dyn CredentialStorage>,
    pub replay: Arc<dyn ReplayStorage>,
}

impl Default for Storages {
    fn default() -> Self {
        Self {
            wallet: Arc::new(InMemoryWalletStorage::default()),
            credential: Arc::new(InMemoryCredentialStorage::default()),
            replay: Arc::new(InMemoryReplayStorage::new()),
        }
    }
}

pub struct TrustCore {
    pub token_service: TokenService,
    pub presentation_service: PresentationService,
}

impl Default for TrustCore {
    fn default() -> Self {
        Self::new(None, Storages::default(), reqwest::Client::new())
    }
}

impl TrustCore {
    pub fn new(
        config: Option<TrustCoreConfig>,
        storages: Storages,
        client: reqwest::Client,
    ) -> Self {
        let config = config.unwrap_or_default();

        // initialize crypto provider
        let crypto_provider = Arc::new(CryptoProviderImpl::new(
            HashMap::from_iter(vec![(
                CryptoAlgorithm::Sha256.to_string(),
                Arc::new(Sha256Hasher) as _,
            )]),
            HashMap::from_iter(vec![(
                CryptoAlgorithm::Ed25519.to_string(),
                Arc::new(Ed25519Signer) as _,
            )]),
        ));

        // initialize key algorithm provider
        let key_algorithm_provider = Arc::new(KeyAlgorithmProviderImpl::new(
            HashMap::from_iter(vec![(
                KeyAlgorithmType::Eddsa.to_string(),
                Arc::new(Eddsa) as _,
            )]),
            crypto_provider.clone(),
        ));

        // initialize key storage provider
        let key_storages: HashMap<String, Arc<dyn KeyStorage>> = HashMap::from_iter(vec![(
            StorageType::Internal.to_string(),
            Arc::new(InternalKeyStorage::new(
                key_algorithm_provider.clone(),
                InternalKeyStorageParams {
                    encryption: config.key_storage.encryption.clone(),
                },
            )) as _,
        )]);
        let key_provider = Arc::new(KeyProviderImpl::new(key_storages));

        // initialize did method provider
        let did_method_provider = Arc::new(DidMethodProviderImpl::new(HashMap::from_iter(vec![(
            DidMethodType::Web.to_string(),
            Arc::new(WebDidMethod::new(
                client.clone(),
                WebDidMethodParams {
                    resolve_to_insecure_http: config.did_method.resolve_to_insecure_http,
                },
            )) as _,
        )])));

        let key_signer: Arc<dyn KeySigner> = Arc::new(KeySignerImpl::new(
            key_provider,
            Box::new(KeyVerification {
                did_method_provider,
                key_algorithm_provider,
                key_role: KeyRole::Authentication,
            }),
        ));

        // initialize presentation formatter provider
        let formatter_provider = Arc::new(CredentialFormatterProviderImpl::new(
            HashMap::from_iter(vec![
                (
                    PresentationFormat::Jwt.to_string(),
                    Arc::new(JWTFormatter::new(JWTParams {
                        leeway: config.formatter.leeway,
                        presentation_validity: config.formatter.presentation_validity,
                    })) as _,
                ),
                (
                    PresentationFormat::JsonLd.to_string(),
                    Arc::new(JsonLdFormatter::new(
                        JsonLdParams {
                            leeway: config.formatter.leeway,
                            presentation_validity: config.formatter.presentation_validity,
                        },
                        crypto_provider,
                    )) as _,
                ),
            ]),
        ));

        let revocation_method_provider = config.revocation.url.clone().map(|url| {
            Arc::new(RevocationMethodProviderImpl::new(vec![Arc::new(
                RevocationServiceClient::new(client, RevocationServiceParams { url }),
            ) as _])) as Arc<dyn RevocationMethodProvider>
        });

        let validator = Arc::new(TokenValidator::new(
            key_signer.clone(),
            storages.wallet.clone(),
            ValidatorParams {
                leeway: config.token.leeway,
            },
        ));

        let gate = PresentationGate::new(
            key_signer.clone(),
            storages.wallet.clone(),
            storages.credential,
            formatter_provider.clone(),
            revocation_method_provider,
            PresentationGateParams {
                scope_namespace: config.scope.namespace.clone(),
                enforce_revocation: config.revocation.enforce,
            },
        );

        let token_service = TokenService::new(
            TokenIssuer::new(key_signer.clone()),
            validator.clone(),
            storages.wallet,
            config.scope.namespace,
            config.token.validity,
        );

        let presentation_service = PresentationService::new(
            validator,
            ReplayGuard::new(
                storages.replay,
                Duration::seconds(config.token.leeway.try_into().unwrap_or(i64::MAX)),
            ),
            gate,
            formatter_provider,
            key_signer,
        );

        Self {
            token_service,
            presentation_service,
        }
    }
}
