//! Fixed-width checkpoint text for all generator layers.
//!
//! Each layer encodes as a tag character followed by positional fields. Every
//! numeric field is lower-case hexadecimal, right-aligned and space-padded to
//! its width; floating-point fields carry the raw IEEE-754 bit pattern so the
//! round trip is bit-exact. Outer layers append the encoding of the layer they
//! own.
//!
//! | Layer    | Layout                                                        | Bytes |
//! |----------|---------------------------------------------------------------|-------|
//! | Integer  | `I` ␠ seed(8) ␠ index(8) word(17) × 312                        | 5323  |
//! | Uniform  | `U` lower(17) upper(17) ␠ *Integer*                            | 5359  |
//! | Gaussian | `G` mean(17) stddev(17) z1(17) z2(17) cached(9) ␠ *Uniform*    | 5438  |
//!
//! Decoding never scans for delimiters; fields are sliced at fixed offsets.
//! [`from_state_str`](IntegerRng::from_state_str) reports malformed input as a
//! [`StateError`]. [`restore`](IntegerRng::restore) is the fail-fast variant
//! used when resuming a run: a corrupted checkpoint aborts instead of yielding
//! a silently different stream.

use std::fmt;
use std::str::FromStr;

use crate::error::{StateError, StateResult};
use crate::gaussian::GaussianRng;
use crate::integer::{IntegerRng, INITIAL_INDEX, REFILLED_INDEX, STATE_SIZE};
use crate::uniform::UniformRng;

/// Tag of an [`IntegerRng`] encoding.
pub const INTEGER_TAG: char = 'I';
/// Tag of a [`UniformRng`] encoding.
pub const UNIFORM_TAG: char = 'U';
/// Tag of a [`GaussianRng`] encoding.
pub const GAUSSIAN_TAG: char = 'G';

const SEED_WIDTH: usize = 8;
const INDEX_WIDTH: usize = 8;
const WORD_WIDTH: usize = 17;
const FLAG_WIDTH: usize = 9;

/// Encoded length of an [`IntegerRng`].
pub const INTEGER_STATE_LEN: usize = 1 + 1 + SEED_WIDTH + 1 + INDEX_WIDTH + STATE_SIZE * WORD_WIDTH;
/// Encoded length of a [`UniformRng`].
pub const UNIFORM_STATE_LEN: usize = 1 + 2 * WORD_WIDTH + 1 + INTEGER_STATE_LEN;
/// Encoded length of a [`GaussianRng`].
pub const GAUSSIAN_STATE_LEN: usize = 1 + 4 * WORD_WIDTH + FLAG_WIDTH + 1 + UNIFORM_STATE_LEN;

// ============================================================================
// Encoding
// ============================================================================

impl fmt::Display for IntegerRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{INTEGER_TAG} {:>sw$x} {:>iw$x}",
            self.seed,
            self.index,
            sw = SEED_WIDTH,
            iw = INDEX_WIDTH
        )?;
        for word in &self.state {
            write!(f, "{:>w$x}", word, w = WORD_WIDTH)?;
        }
        Ok(())
    }
}

impl fmt::Display for UniformRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{UNIFORM_TAG}{:>w$x}{:>w$x} {}",
            self.lower.to_bits(),
            self.upper.to_bits(),
            self.integer,
            w = WORD_WIDTH
        )
    }
}

impl fmt::Display for GaussianRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{GAUSSIAN_TAG}{:>w$x}{:>w$x}{:>w$x}{:>w$x}{:>fw$x} {}",
            self.mean.to_bits(),
            self.stddev.to_bits(),
            self.z1.to_bits(),
            self.z2.to_bits(),
            u32::from(self.has_cached),
            self.uniform,
            w = WORD_WIDTH,
            fw = FLAG_WIDTH
        )
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Cursor over fixed-width fields of a state string.
struct FieldReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> FieldReader<'a> {
    /// Checks the leading tag and total length before any field is read.
    fn open(text: &'a str, tag: char, expected_len: usize) -> StateResult<Self> {
        let found = text.chars().next();
        if found != Some(tag) {
            return Err(StateError::TagMismatch {
                expected: tag,
                found,
            });
        }
        if text.len() != expected_len {
            return Err(StateError::Length {
                tag,
                expected: expected_len,
                actual: text.len(),
            });
        }

        Ok(Self {
            bytes: text.as_bytes(),
            offset: 0,
        })
    }

    fn take(&mut self, width: usize) -> &'a [u8] {
        let field = &self.bytes[self.offset..self.offset + width];
        self.offset += width;
        field
    }

    fn tag(&mut self, tag: char) -> StateResult<()> {
        let found = self.bytes.get(self.offset).map(|&b| char::from(b));
        if found != Some(tag) {
            return Err(StateError::TagMismatch {
                expected: tag,
                found,
            });
        }
        self.offset += 1;
        Ok(())
    }

    fn separator(&mut self) -> StateResult<()> {
        let offset = self.offset;
        match self.take(1) {
            b" " => Ok(()),
            _ => Err(StateError::MissingSeparator { offset }),
        }
    }

    fn hex_u64(&mut self, field: &'static str, width: usize) -> StateResult<u64> {
        let offset = self.offset;
        let raw = self.take(width);
        parse_hex(raw)
            .and_then(|digits| u64::from_str_radix(digits, 16).ok())
            .ok_or_else(|| StateError::InvalidField {
                field,
                offset,
                text: String::from_utf8_lossy(raw).into_owned(),
            })
    }

    fn hex_u32(&mut self, field: &'static str, width: usize) -> StateResult<u32> {
        let offset = self.offset;
        let raw = self.take(width);
        parse_hex(raw)
            .and_then(|digits| u32::from_str_radix(digits, 16).ok())
            .ok_or_else(|| StateError::InvalidField {
                field,
                offset,
                text: String::from_utf8_lossy(raw).into_owned(),
            })
    }

    fn float(&mut self, field: &'static str) -> StateResult<f64> {
        self.hex_u64(field, WORD_WIDTH).map(f64::from_bits)
    }
}

/// Strips left padding and returns the hex digits, if the field is well formed.
fn parse_hex(raw: &[u8]) -> Option<&str> {
    let start = raw.iter().position(|&b| b != b' ')?;
    let digits = &raw[start..];
    if !digits.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    std::str::from_utf8(digits).ok()
}

fn read_integer(reader: &mut FieldReader<'_>) -> StateResult<IntegerRng> {
    reader.tag(INTEGER_TAG)?;
    reader.separator()?;
    let seed = reader.hex_u32("seed", SEED_WIDTH)? as i32;
    reader.separator()?;
    let index = reader.hex_u32("index", INDEX_WIDTH)? as i32;
    if !(REFILLED_INDEX..=INITIAL_INDEX).contains(&index) {
        return Err(StateError::IndexOutOfRange { index });
    }

    let mut state = [0u64; STATE_SIZE];
    for word in state.iter_mut() {
        *word = reader.hex_u64("state word", WORD_WIDTH)?;
    }

    Ok(IntegerRng { seed, index, state })
}

fn read_uniform(reader: &mut FieldReader<'_>) -> StateResult<UniformRng> {
    reader.tag(UNIFORM_TAG)?;
    let lower = reader.float("lower")?;
    let upper = reader.float("upper")?;
    reader.separator()?;
    let integer = read_integer(reader)?;

    Ok(UniformRng {
        lower,
        upper,
        integer,
    })
}

fn read_gaussian(reader: &mut FieldReader<'_>) -> StateResult<GaussianRng> {
    reader.tag(GAUSSIAN_TAG)?;
    let mean = reader.float("mean")?;
    let stddev = reader.float("stddev")?;
    let z1 = reader.float("z1")?;
    let z2 = reader.float("z2")?;
    let has_cached = match reader.hex_u32("cached flag", FLAG_WIDTH)? {
        0 => false,
        1 => true,
        value => return Err(StateError::InvalidFlag { value }),
    };
    reader.separator()?;
    let uniform = read_uniform(reader)?;

    Ok(GaussianRng {
        mean,
        stddev,
        z1,
        z2,
        has_cached,
        uniform,
    })
}

/// Logs and aborts a restore that cannot continue.
fn fail_restore(layer: &str, err: StateError) -> ! {
    tracing::error!(layer, error = %err, "corrupted generator state");
    panic!("Error in restoring {layer} random number generator: {err}");
}

// ============================================================================
// Public API
// ============================================================================

impl IntegerRng {
    /// Encodes the complete generator state as checkpoint text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use twister_core::IntegerRng;
    /// use twister_core::state::INTEGER_STATE_LEN;
    ///
    /// let text = IntegerRng::new(42).to_state_string();
    /// assert_eq!(text.len(), INTEGER_STATE_LEN);
    /// assert!(text.starts_with("I       2a      139"));
    /// ```
    pub fn to_state_string(&self) -> String {
        tracing::debug!(seed = self.seed, index = self.index, "encoding integer state");
        self.to_string()
    }

    /// Decodes checkpoint text produced by [`to_state_string`](Self::to_state_string).
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if the tag, length, separators or any field
    /// are malformed.
    pub fn from_state_str(text: &str) -> StateResult<Self> {
        let mut reader = FieldReader::open(text, INTEGER_TAG, INTEGER_STATE_LEN)?;
        let rng = read_integer(&mut reader)?;
        tracing::debug!(seed = rng.seed, index = rng.index, "decoded integer state");
        Ok(rng)
    }

    /// Restores a generator from checkpoint text, aborting on corruption.
    ///
    /// # Panics
    ///
    /// Panics if the text is not a valid integer encoding, in particular if
    /// its leading tag is not `I`.
    pub fn restore(text: &str) -> Self {
        Self::from_state_str(text).unwrap_or_else(|err| fail_restore("int", err))
    }
}

impl UniformRng {
    /// Encodes the bounds and the embedded integer state.
    pub fn to_state_string(&self) -> String {
        tracing::debug!(lower = self.lower, upper = self.upper, "encoding uniform state");
        self.to_string()
    }

    /// Decodes checkpoint text produced by [`to_state_string`](Self::to_state_string).
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if this or the embedded integer encoding is
    /// malformed.
    pub fn from_state_str(text: &str) -> StateResult<Self> {
        let mut reader = FieldReader::open(text, UNIFORM_TAG, UNIFORM_STATE_LEN)?;
        let rng = read_uniform(&mut reader)?;
        tracing::debug!(lower = rng.lower, upper = rng.upper, "decoded uniform state");
        Ok(rng)
    }

    /// Restores a generator from checkpoint text, aborting on corruption.
    ///
    /// # Panics
    ///
    /// Panics if the text is not a valid uniform encoding, in particular if
    /// its leading tag is not `U`.
    pub fn restore(text: &str) -> Self {
        Self::from_state_str(text).unwrap_or_else(|err| fail_restore("uniform", err))
    }
}

impl GaussianRng {
    /// Encodes the parameters, the cached pair and the embedded uniform state.
    pub fn to_state_string(&self) -> String {
        tracing::debug!(
            mean = self.mean,
            stddev = self.stddev,
            has_cached = self.has_cached,
            "encoding gaussian state"
        );
        self.to_string()
    }

    /// Decodes checkpoint text produced by [`to_state_string`](Self::to_state_string).
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if this or any embedded encoding is malformed.
    pub fn from_state_str(text: &str) -> StateResult<Self> {
        let mut reader = FieldReader::open(text, GAUSSIAN_TAG, GAUSSIAN_STATE_LEN)?;
        let rng = read_gaussian(&mut reader)?;
        tracing::debug!(
            mean = rng.mean,
            stddev = rng.stddev,
            has_cached = rng.has_cached,
            "decoded gaussian state"
        );
        Ok(rng)
    }

    /// Restores a generator from checkpoint text, aborting on corruption.
    ///
    /// # Panics
    ///
    /// Panics if the text is not a valid gaussian encoding, in particular if
    /// its leading tag is not `G`.
    pub fn restore(text: &str) -> Self {
        Self::from_state_str(text).unwrap_or_else(|err| fail_restore("gaussian", err))
    }
}

impl FromStr for IntegerRng {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_state_str(s)
    }
}

impl FromStr for UniformRng {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_state_str(s)
    }
}

impl FromStr for GaussianRng {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_state_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replaces `width` bytes at `offset`.
    fn splice(text: &str, offset: usize, replacement: &str) -> String {
        let mut out = text.to_string();
        out.replace_range(offset..offset + replacement.len(), replacement);
        out
    }

    #[test]
    fn test_encoded_lengths() {
        assert_eq!(INTEGER_STATE_LEN, 5323);
        assert_eq!(UNIFORM_STATE_LEN, 5359);
        assert_eq!(GAUSSIAN_STATE_LEN, 5438);

        assert_eq!(IntegerRng::new(1).to_state_string().len(), INTEGER_STATE_LEN);
        assert_eq!(
            UniformRng::new(1, 0.0, 1.0).to_state_string().len(),
            UNIFORM_STATE_LEN
        );
        assert_eq!(
            GaussianRng::new(1, 0.0, 1.0).to_state_string().len(),
            GAUSSIAN_STATE_LEN
        );
    }

    #[test]
    fn test_integer_layout() {
        let text = IntegerRng::new(42).to_state_string();
        assert!(text.starts_with("I       2a      139               2a 7d720f6e9086dd63"));
    }

    #[test]
    fn test_negative_seed_layout() {
        let text = IntegerRng::new(-1).to_state_string();
        assert!(text.starts_with("I ffffffff      139 ffffffffffffffff 9eb82f4acdaa034d"));
    }

    #[test]
    fn test_uniform_layout() {
        let text = UniformRng::new(42, 2.0, 5.0).to_state_string();
        assert!(text.starts_with(
            "U 4000000000000000 4014000000000000 I       2a      139               2a"
        ));
    }

    #[test]
    fn test_gaussian_layout() {
        let text = GaussianRng::new(42, 1.5, 2.0).to_state_string();
        let expected = concat!(
            "G 3ff8000000000000 4000000000000000",
            "                0                0",
            "        0 ",
            "U                0 3ff0000000000000 I"
        );
        assert!(text.starts_with(expected), "got {}", &text[..expected.len()]);
    }

    #[test]
    fn test_cached_flag_encoded_as_one() {
        let mut rng = GaussianRng::new(42, 0.0, 1.0);
        rng.next_gaussian();
        let text = rng.to_state_string();
        assert_eq!(&text[69..79], "        1 ");
    }

    #[test]
    fn test_integer_round_trip_after_refill() {
        let mut rng = IntegerRng::new(42);
        for _ in 0..313 {
            rng.next_i64();
        }
        let restored = IntegerRng::from_state_str(&rng.to_state_string()).unwrap();
        assert_eq!(restored, rng);
        assert_eq!(restored.index(), 0);
    }

    #[test]
    fn test_refilled_index_round_trip() {
        let mut rng = IntegerRng::new(3);
        rng.index = REFILLED_INDEX;
        let text = rng.to_state_string();
        assert_eq!(&text[11..19], "ffffffff");
        assert_eq!(IntegerRng::from_state_str(&text).unwrap(), rng);
    }

    #[test]
    fn test_gaussian_round_trip_preserves_cache() {
        let mut rng = GaussianRng::new(17, -2.0, 0.25);
        rng.next_gaussian();
        let restored: GaussianRng = rng.to_state_string().parse().unwrap();
        assert_eq!(restored, rng);
        assert!(restored.has_cached());
    }

    #[test]
    fn test_non_finite_floats_round_trip() {
        let rng = UniformRng::new(0, f64::NEG_INFINITY, f64::NAN);
        let restored = UniformRng::from_state_str(&rng.to_state_string()).unwrap();
        assert_eq!(restored.lower(), f64::NEG_INFINITY);
        assert_eq!(restored.upper().to_bits(), f64::NAN.to_bits());
    }

    #[test]
    fn test_tag_mismatch_detected_before_length() {
        let gaussian = GaussianRng::new(1, 0.0, 1.0).to_state_string();
        assert_eq!(
            UniformRng::from_state_str(&gaussian),
            Err(StateError::TagMismatch {
                expected: 'U',
                found: Some('G'),
            })
        );
        assert_eq!(
            IntegerRng::from_state_str(""),
            Err(StateError::TagMismatch {
                expected: 'I',
                found: None,
            })
        );
    }

    #[test]
    fn test_wrong_length_rejected() {
        let text = IntegerRng::new(1).to_state_string();
        let err = IntegerRng::from_state_str(&text[..100]).unwrap_err();
        assert_eq!(
            err,
            StateError::Length {
                tag: 'I',
                expected: INTEGER_STATE_LEN,
                actual: 100,
            }
        );

        let padded = format!("{text}\n");
        assert!(matches!(
            IntegerRng::from_state_str(&padded),
            Err(StateError::Length { .. })
        ));
    }

    #[test]
    fn test_nested_tag_checked() {
        let text = UniformRng::new(1, 0.0, 1.0).to_state_string();
        let corrupted = splice(&text, 36, "X");
        assert_eq!(
            UniformRng::from_state_str(&corrupted),
            Err(StateError::TagMismatch {
                expected: 'I',
                found: Some('X'),
            })
        );
    }

    #[test]
    fn test_invalid_hex_field() {
        let text = IntegerRng::new(1).to_state_string();
        let corrupted = splice(&text, 19, "  not-hex-at-all!");
        match IntegerRng::from_state_str(&corrupted) {
            Err(StateError::InvalidField { field, offset, .. }) => {
                assert_eq!(field, "state word");
                assert_eq!(offset, 19);
            }
            other => panic!("Expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_field_rejected() {
        let text = IntegerRng::new(1).to_state_string();
        let corrupted = splice(&text, 2, "        ");
        assert!(matches!(
            IntegerRng::from_state_str(&corrupted),
            Err(StateError::InvalidField { field: "seed", .. })
        ));
    }

    #[test]
    fn test_missing_separator() {
        let text = IntegerRng::new(1).to_state_string();
        let corrupted = splice(&text, 1, "0");
        assert_eq!(
            IntegerRng::from_state_str(&corrupted),
            Err(StateError::MissingSeparator { offset: 1 })
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let text = IntegerRng::new(1).to_state_string();
        let corrupted = splice(&text, 11, "fffffffe");
        assert_eq!(
            IntegerRng::from_state_str(&corrupted),
            Err(StateError::IndexOutOfRange { index: -2 })
        );
    }

    #[test]
    fn test_garbage_cached_flag_rejected() {
        let text = GaussianRng::new(1, 0.0, 1.0).to_state_string();
        let corrupted = splice(&text, 69, " b26e1701");
        assert_eq!(
            GaussianRng::from_state_str(&corrupted),
            Err(StateError::InvalidFlag { value: 0xb26e1701 })
        );
    }

    #[test]
    fn test_non_ascii_input_does_not_panic() {
        let text = IntegerRng::new(1).to_state_string();
        let corrupted = splice(&text, 30, "é");
        assert!(IntegerRng::from_state_str(&corrupted).is_err());
    }

    #[test]
    #[should_panic(expected = "Error in restoring uniform random number generator")]
    fn test_restore_panics_on_tag_mismatch() {
        let gaussian = GaussianRng::new(1, 0.0, 1.0).to_state_string();
        let _ = UniformRng::restore(&gaussian);
    }

    #[test]
    #[should_panic(expected = "Error in restoring int random number generator")]
    fn test_restore_panics_on_truncation() {
        let _ = IntegerRng::restore("I 1 2");
    }
}
