use ct_codecs::{Base64UrlSafeNoPadding, Encoder};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

pub fn generate_random_seed_32() -> [u8; 32] {
    let mut rng = ChaCha20Rng::from_entropy();
    let mut seed = [0u8; 32];
    rng.fill_bytes(&mut seed);
    seed
}

/// Fresh 256-bit nonce encoded as base64url without padding.
pub fn generate_nonce() -> String {
    let seed = generate_random_seed_32();

    // This operation should be safe as we control the input.
    Base64UrlSafeNoPadding::encode_to_string(seed).unwrap_or_default()
}
