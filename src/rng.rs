use getrandom::getrandom;
use oorandom::Rand64;

pub fn preseeded_rng64() -> Rand64 {
    Rand64::new(os_random_seed())
}

pub fn rng64(seed: u128) -> Rand64 {
    Rand64::new(seed)
}

pub fn os_random_seed() -> u128 {
    let mut buf = [0; 16];
    let _res = getrandom(&mut buf);
    u128::from_le_bytes(buf)
}

/// Draws a seed for a child generator from two consecutive 64 bit values.
pub fn split_seed(rng: &mut Rand64) -> u128 {
    rng.rand_u64() as u128 + ((rng.rand_u64() as u128) << 64)
}

/// Uniformly picks an index in `0..len`. `len` must not be zero.
pub fn rand_index(rng: &mut Rand64, len: usize) -> usize {
    rng.rand_range(0..len as u64) as usize
}
