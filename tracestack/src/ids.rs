use rand::{rngs, Rng, SeedableRng};
use std::cell::RefCell;

thread_local! {
    /// Store random number generator for each thread
    static CURRENT_RNG: RefCell<rngs::SmallRng> = RefCell::new(rngs::SmallRng::from_os_rng());
}

/// Generates a random 16-hex-character identifier.
///
/// Used for trace ids and span ids. Not cryptographically strong; the only
/// requirement is a vanishingly small collision probability within one
/// trace's lifetime.
pub fn random_id() -> String {
    CURRENT_RNG.with(|rng| format!("{:016x}", rng.borrow_mut().random::<u64>()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sixteen_hex_chars() {
        let id = random_id();
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ids_do_not_repeat() {
        let ids: std::collections::HashSet<_> = (0..1000).map(|_| random_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
