pub mod key_verification;
