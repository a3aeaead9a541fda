use rand::Rng;

/// Share tokens are 8 lowercase base-36 characters, ~2.8 * 10^12
/// combinations: unguessable enough for a share link, short enough to read
/// out loud. Uniqueness is enforced by the database, not here.
const SHARE_ID_LEN: usize = 8;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

pub fn generate_share_id() -> String {
    let mut rng = rand::rng();
    (0..SHARE_ID_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
