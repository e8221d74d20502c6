use crate::text::seed::Seed;

/// Identifies an independent pseudo-random stream derived from one [`Seed`].
///
/// Each generation step draws from its own stream so that adding a draw in one step never
/// shifts the values seen by another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    Palette,
    Shape,
    Audio,
}

impl Stream {
    fn salt(self) -> u64 {
        match self {
            Self::Palette => 0x7061_6c65_7474_6501,
            Self::Shape => 0x7368_6170_6573_0002,
            Self::Audio => 0x6175_6469_6f00_0003,
        }
    }
}

/// SplitMix64 generator. Always a local value; never shared between generation calls.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn for_stream(seed: Seed, stream: Stream) -> Self {
        Self::new(u64::from(seed.0) ^ stream.salt().wrapping_mul(0xD6E8_FEB8_6659_FD93))
    }

    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform integer in `lo..=hi`. Bounds are swapped when reversed.
    pub fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let span = (i64::from(hi) - i64::from(lo) + 1) as u64;
        // Multiply-shift range reduction.
        let offset = ((u128::from(self.next_u64()) * u128::from(span)) >> 64) as i64;
        (i64::from(lo) + offset) as i32
    }

    /// Uniform float in `[lo, hi)`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64_01()
    }

    /// Standard normal draw (Box-Muller, one value per call).
    pub fn standard_normal(&mut self) -> f64 {
        let u1 = 1.0 - self.next_f64_01();
        let u2 = self.next_f64_01();
        (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
