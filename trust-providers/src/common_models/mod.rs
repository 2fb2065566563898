pub mod credential;
pub mod did;
pub mod key;
pub mod macros;
pub mod wallet;

/// Public key of a DID document verification method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicKeyJwk {
    Ec(PublicKeyJwkEllipticData),
    Okp(PublicKeyJwkEllipticData),
    /// A key type none of the wallet algorithms can use (`RSA`, `oct`, ...).
    Unsupported,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKeyJwkEllipticData {
    pub r#use: Option<String>,
    pub crv: String,
    pub x: String,
    pub y: Option<String>,
}
