//! RNG module - injectable random sources for piece selection
//!
//! Spawning never touches a process-wide generator. Callers hand the engine
//! something implementing [`PieceRng`]:
//!
//! - [`SimpleRng`]: seedable LCG, the default for real games
//! - [`ScriptedRng`]: replays a fixed list of values, for deterministic tests

/// Source of uniformly distributed indices.
pub trait PieceRng {
    /// Return a value in `[0, max)`. `max` is never zero.
    fn next_range(&mut self, max: u32) -> u32;
}

impl<R: PieceRng + ?Sized> PieceRng for &mut R {
    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

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

    /// Current internal state (replaying from it reproduces the sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl PieceRng for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of a power-of-two LCG cycle with a short period
        // (bit 0 alternates), so take the high half before reducing.
        (self.next_u32() >> 16) % max
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed sequence of values, wrapping around at the end.
///
/// Each value is reduced modulo the requested range, so a script of type
/// identifiers selects exactly those piece kinds.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    pos: usize,
}

impl ScriptedRng {
    /// An empty script behaves like a script of a single zero.
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0);
        }
        Self { values, pos: 0 }
    }

    /// Number of values consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl PieceRng for ScriptedRng {
    fn next_range(&mut self, max: u32) -> u32 {
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v % max
    }
}
