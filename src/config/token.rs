use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated bypass tokens
pub const BYPASS_TOKEN_LENGTH: usize = 32;

/// Generates a random alphanumeric bypass token of the given length
pub fn generate_bypass_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
