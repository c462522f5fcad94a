//! 64-bit Mersenne Twister integer generator.
//!
//! This module provides [`IntegerRng`], the leaf of the generator stack. It
//! owns the 312-word twister register and produces tempered 64-bit words.
//!
//! # Algorithm
//!
//! - Seeding expands a single 32-bit seed into 312 words with the linear
//!   recurrence `s[i] = 0x5851F42D4C957F2D * (s[i-1] ^ (s[i-1] >> 62)) + i`.
//! - Once the register is drained, all 312 words are regenerated with the
//!   MT19937-64 twist (shift distance 156).
//! - Each output word passes through a four-stage tempering transform.
//!
//! All arithmetic is wrapping `u64` arithmetic; overflow is part of the
//! algorithm, not an error.

use rand::{RngCore, SeedableRng};

/// Number of 64-bit words in the twister register.
pub const STATE_SIZE: usize = 312;

/// Twist shift distance (word offset of the feedback tap).
const SHIFT: usize = 156;

/// Index assigned at seeding; anything above `STATE_SIZE - 2` forces a refill.
pub(crate) const INITIAL_INDEX: i32 = STATE_SIZE as i32 + 1;

/// Index value right after a refill; the next draw lands on word 0.
pub(crate) const REFILLED_INDEX: i32 = -1;

const SEED_MULTIPLIER: u64 = 0x5851_F42D_4C95_7F2D;
const UPPER_MASK: u64 = 0xFFFF_FFFF_8000_0000;
const LOWER_MASK: u64 = 0x0000_0000_7FFF_FFFF;

/// Twist matrix row selected by the low bit of the combined word.
const MAG: [u64; 2] = [0, 0xB502_6F5A_A966_19E9];

/// Deterministic 64-bit Mersenne Twister stream.
///
/// Two generators built from the same seed produce bit-identical output for
/// ever. The generator is a plain value: cloning it forks an independent
/// stream positioned at the same point.
///
/// # Examples
///
/// ```rust
/// use twister_core::IntegerRng;
///
/// let mut rng1 = IntegerRng::new(42);
/// let mut rng2 = IntegerRng::new(42);
///
/// assert_eq!(rng1.next_i64(), rng2.next_i64());
/// assert_eq!(rng1.next_i32(), rng2.next_i32());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerRng {
    /// Originating seed, kept for reporting and checkpoints.
    pub(crate) seed: i32,
    /// Position of the last word handed out.
    pub(crate) index: i32,
    /// Twister register.
    pub(crate) state: [u64; STATE_SIZE],
}

impl IntegerRng {
    /// Creates a generator seeded with `seed`.
    ///
    /// The seed is sign-extended into the first register word and the rest of
    /// the register is derived from it. The first draw triggers a refill.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use twister_core::IntegerRng;
    ///
    /// let rng = IntegerRng::new(-7);
    /// assert_eq!(rng.seed(), -7);
    /// assert_eq!(rng.state()[0], (-7i64) as u64);
    /// ```
    pub fn new(seed: i32) -> Self {
        let mut state = [0u64; STATE_SIZE];
        state[0] = i64::from(seed) as u64;
        for i in 1..STATE_SIZE {
            let prev = state[i - 1];
            state[i] = SEED_MULTIPLIER
                .wrapping_mul(prev ^ (prev >> 62))
                .wrapping_add(i as u64);
        }

        Self {
            seed,
            index: INITIAL_INDEX,
            state,
        }
    }

    /// Returns the seed this stream was created from.
    #[inline]
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Returns the position of the last word drawn.
    ///
    /// This is `313` for a freshly seeded generator and lies in `[0, 311]`
    /// after any draw.
    #[inline]
    pub fn index(&self) -> i32 {
        self.index
    }

    /// Read-only view of the twister register.
    #[inline]
    pub fn state(&self) -> &[u64; STATE_SIZE] {
        &self.state
    }

    /// Draws the next tempered 64-bit word.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use twister_core::IntegerRng;
    ///
    /// let mut rng = IntegerRng::new(42);
    /// assert_eq!(rng.next_i64(), -4516583221451431210);
    /// ```
    #[inline]
    pub fn next_i64(&mut self) -> i64 {
        self.next_word() as i64
    }

    /// Draws the next 32-bit value: the high half of the next 64-bit word.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use twister_core::IntegerRng;
    ///
    /// let mut rng = IntegerRng::new(42);
    /// assert_eq!(rng.next_i32(), -1051598979);
    /// ```
    #[inline]
    pub fn next_i32(&mut self) -> i32 {
        (self.next_word() >> 32) as u32 as i32
    }

    /// Fills the buffer with consecutive 64-bit draws.
    pub fn fill_i64(&mut self, buffer: &mut [i64]) {
        for value in buffer.iter_mut() {
            *value = self.next_i64();
        }
    }

    /// Draws the next tempered word as an unsigned value.
    #[inline]
    pub(crate) fn next_word(&mut self) -> u64 {
        if self.index > STATE_SIZE as i32 - 2 {
            self.refill();
        }

        self.index += 1;
        temper(self.state[self.index as usize])
    }

    /// Regenerates the whole register.
    ///
    /// Processed in three ranges so that no tap index ever wraps: words
    /// `[0, 156)` read ahead, words `[156, 311)` read behind, and the last
    /// word pairs with word 0.
    fn refill(&mut self) {
        tracing::trace!(seed = self.seed, "refilling twister state");

        let s = &mut self.state;

        for i in 0..STATE_SIZE - SHIFT {
            let x = (s[i] & UPPER_MASK) | (s[i + 1] & LOWER_MASK);
            s[i] = s[i + SHIFT] ^ (x >> 1) ^ MAG[(x & 1) as usize];
        }

        for i in STATE_SIZE - SHIFT..STATE_SIZE - 1 {
            let x = (s[i] & UPPER_MASK) | (s[i + 1] & LOWER_MASK);
            s[i] = s[i + SHIFT - STATE_SIZE] ^ (x >> 1) ^ MAG[(x & 1) as usize];
        }

        let x = (s[STATE_SIZE - 1] & UPPER_MASK) | (s[0] & LOWER_MASK);
        s[STATE_SIZE - 1] = s[SHIFT - 1] ^ (x >> 1) ^ MAG[(x & 1) as usize];

        self.index = REFILLED_INDEX;
    }
}

/// Tempering transform applied to every output word.
#[inline]
fn temper(mut word: u64) -> u64 {
    word ^= (word >> 29) & 0x5555_5555_5555_5555;
    word ^= (word << 17) & 0x71D6_7FFF_EDA6_0000;
    word ^= (word << 37) & 0xFFF7_EEE0_0000_0000;
    word ^ (word >> 43)
}

impl RngCore for IntegerRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next_word() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.next_word()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_word().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for IntegerRng {
    /// Little-endian bytes of the 32-bit seed.
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(i32::from_le_bytes(seed))
    }
}
