pub mod aes_gcm;
pub mod key;
