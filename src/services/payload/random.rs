/// Source of payment nonces
pub trait RandomSource: Send + Sync {
	fn next_u64(&self) -> u64;
}

/// Nonces from the thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
	fn next_u64(&self) -> u64 {
		rand::random::<u64>()
	}
}

/// Always returns the same value
#[derive(Debug, Clone, Copy)]
pub struct FixedRandomSource(pub u64);

impl RandomSource for FixedRandomSource {
	fn next_u64(&self) -> u64 {
		self.0
	}
}
