//! RNG module - uniform piece generation
//!
//! Every piece is drawn independently with probability 1/7; there is no bag or
//! history. The generator is a small seeded LCG so a session can be replayed
//! exactly from its seed, which keeps tests and benches deterministic.

use blockfall_types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses multiply-shift so the result depends on the high bits, which are the
    /// well-mixed ones in an LCG.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state (usable as a seed to resume the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Where a session gets its pieces from.
///
/// The session draws exactly one piece per spawn (the lookahead slot is refilled
/// each time the next piece is promoted).
pub trait PieceSource {
    fn next_piece(&mut self) -> PieceKind;
}

/// Uniform, independent draws over the seven kinds.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: SimpleRng,
}

impl RandomSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for RandomSource {
    fn next_piece(&mut self) -> PieceKind {
        crate::catalog::PieceCatalog::generate_random(&mut self.rng)
    }
}

/// Cycles through a fixed list of kinds forever.
///
/// Used by tests, benches and demos that need a known piece order.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl SequenceSource {
    /// Panics if `kinds` is empty.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "SequenceSource needs at least one kind");
        Self { kinds, index: 0 }
    }

    /// The same kind every time.
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }
}

impl PieceSource for SequenceSource {
    fn next_piece(&mut self) -> PieceKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}
