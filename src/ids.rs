use rand::RngCore;

/// Mints a 128-bit row id as 32 lowercase hex chars. Application-side so
/// inserts can return the id without a round trip.
pub fn new_id() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    let mut out = String::with_capacity(32);
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
