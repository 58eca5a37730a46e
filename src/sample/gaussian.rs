//! Discrete Gaussian samplers (L3), grounded on
//! `examples/original_source/src/sample/normal_*.c`.
//!
//! The original precomputes tables in arbitrary-precision floats (`mpf_t`)
//! sized by a statistical-distance parameter `n` (bits of approximation).
//! This rewrite uses `f64` tables instead — the precision parameter `n` is
//! kept in the public API (so callers size their samplers the same way) but
//! governs table width, not float mantissa width; this trades unbounded
//! statistical precision for a fixed ~52-bit mantissa, noted as an accepted
//! simplification in `DESIGN.md`.

use num_bigint::BigInt;
use rand::RngCore;

use crate::math::bigint::uniform_below;

fn cut_for(sigma: f64, n: u32) -> i64 {
    (sigma * (n as f64).sqrt()).ceil() as i64 + 1
}

/// Normal-cumulative sampler: precomputes the cumulative distribution of
/// `exp(-i²/2σ²)` for `i ∈ [0, cut]`, samples via uniform-then-binary-search.
///
/// Ground truth: `cfe_normal_cumulative_*` in `normal_cumulative.c`.
#[derive(Debug, Clone)]
pub struct NormalCumulative {
    sigma: f64,
    two_sided: bool,
    /// `precomputed[i]` is the (unnormalized) cumulative mass up to value `i`.
    precomputed: Vec<u64>,
    scale: u64,
}

impl NormalCumulative {
    /// Build a sampler for standard deviation `sigma`, approximation
    /// precision `n` (bits), optionally symmetric about zero.
    pub fn new(sigma: f64, n: u32, two_sided: bool) -> Self {
        let cut = cut_for(sigma, n).max(1) as usize;
        let scale = 1u64 << (n.min(62));
        let two_sigma_sq = 2.0 * sigma * sigma;
        let mut precomputed = Vec::with_capacity(cut + 1);
        precomputed.push(0u64);
        let mut running = 0u64;
        for i in 0..cut {
            let mut mass = (-((i * i) as f64) / two_sigma_sq).exp();
            if i == 0 && two_sided {
                mass /= 2.0;
            }
            running = running.saturating_add((mass * scale as f64).trunc() as u64);
            precomputed.push(running);
        }
        NormalCumulative {
            sigma,
            two_sided,
            precomputed,
            scale,
        }
    }

    /// The standard deviation this sampler was constructed for.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Draw one sample.
    pub fn sample<R: RngCore + ?Sized>(&self, rng: &mut R) -> BigInt {
        let max_value = *self.precomputed.last().unwrap();
        let sample_size = if self.two_sided { max_value * 2 } else { max_value };
        let mut draw = uniform_below(rng, &BigInt::from(sample_size.max(1)))
            .to_string()
            .parse::<u64>()
            .unwrap_or(0);
        let mut sign = 1i64;
        if self.two_sided && draw >= max_value {
            sign = -1;
            draw -= max_value;
        }
        let idx = locate(&self.precomputed, draw);
        BigInt::from(idx as i64 * sign)
    }
}

/// Binary search: the smallest `i` such that `precomputed[i] > sample`,
/// minus one (i.e. which bucket `sample` falls into).
fn locate(precomputed: &[u64], sample: u64) -> usize {
    let (mut lo, mut hi) = (0usize, precomputed.len() - 1);
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if sample < precomputed[mid] {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    lo
}

/// Normal-negative sampler: rejection sampling over `[-cut, cut]` with an
/// `exp`-based Bernoulli acceptance test.
///
/// Ground truth: `cfe_normal_negative_*` in `normal_negative.c`.
#[derive(Debug, Clone)]
pub struct NormalNegative {
    sigma: f64,
    cut: i64,
}

impl NormalNegative {
    /// Build a sampler for standard deviation `sigma`, precision `n` bits.
    pub fn new(sigma: f64, n: u32) -> Self {
        NormalNegative {
            sigma,
            cut: cut_for(sigma, n).max(1),
        }
    }

    /// Draw one sample via rejection sampling.
    pub fn sample<R: RngCore + ?Sized>(&self, rng: &mut R) -> BigInt {
        loop {
            let span = BigInt::from(2 * self.cut + 1);
            let draw = uniform_below(rng, &span);
            let n = draw - self.cut;
            let n_f: f64 = n.to_string().parse().unwrap_or(0.0);
            let prob = (-(n_f * n_f) / (2.0 * self.sigma * self.sigma)).exp();
            let u: f64 = (rng.next_u64() as f64) / (u64::MAX as f64);
            if u < prob {
                return n;
            }
        }
    }
}

/// Fixed-table normal-CDT sampler for the constant-sigma base distribution
/// `σ₀ = 1 / (2 ln 2)`, with masked (branch-free) table scanning.
///
/// Ground truth: `cfe_normal_cdt_sample` in `normal_cdt.c`.
#[derive(Debug, Clone)]
pub struct NormalCdt {
    table: Vec<u64>,
}

impl Default for NormalCdt {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalCdt {
    /// `σ₀ = 1 / (2 ln 2)`, the fixed base width of the CDT table.
    pub const SIGMA0: f64 = 1.0 / (2.0 * std::f64::consts::LN_2);

    /// Build the fixed cumulative table (`cut` entries wide, scaled to 63 bits).
    pub fn new() -> Self {
        let cut = cut_for(Self::SIGMA0, 64).max(8) as usize;
        let scale = (1u64 << 63) as f64;
        let two_sigma_sq = 2.0 * Self::SIGMA0 * Self::SIGMA0;
        let mut table = Vec::with_capacity(cut);
        let mut running = 0.0f64;
        for i in 0..cut {
            running += (-((i * i) as f64) / two_sigma_sq).exp();
            table.push((running * scale) as u64);
        }
        NormalCdt { table }
    }

    /// Draw one sample, scanning the whole table every time (masked
    /// comparisons rather than early-exit) to keep timing independent of
    /// the sampled value.
    pub fn sample<R: RngCore + ?Sized>(&self, rng: &mut R) -> i64 {
        let draw = rng.next_u64() >> 1; // 63 significant bits
        let mut idx = 0i64;
        let mut found = false;
        for (i, &bound) in self.table.iter().enumerate() {
            let hit = (!found) && draw < bound;
            idx = if hit { i as i64 } else { idx };
            found |= hit;
        }
        let sign = if rng.next_u32() & 1 == 1 { -1 } else { 1 };
        idx * sign
    }
}

/// Normal-double-constant-time sampler: composes [`NormalCdt`] (a small
/// base-width Gaussian) with a uniform draw and a Bernoulli test to reach an
/// arbitrary target `σ = k · σ₀`.
///
/// Ground truth: `cfe_normal_double_constant_*` in `normal_double_constant.c`.
#[derive(Debug, Clone)]
pub struct NormalDoubleCt {
    k: i64,
    cdt: NormalCdt,
}

impl NormalDoubleCt {
    /// Build a sampler targeting standard deviation `sigma = k * σ₀`.
    pub fn new(sigma: f64) -> Self {
        let k = (sigma / NormalCdt::SIGMA0).round().max(1.0) as i64;
        NormalDoubleCt {
            k,
            cdt: NormalCdt::new(),
        }
    }

    /// Draw one sample.
    pub fn sample<R: RngCore + ?Sized>(&self, rng: &mut R) -> BigInt {
        loop {
            let x = self.cdt.sample(rng);
            let twice_k = 2 * self.k;
            let mut y = (rng.next_u64() % twice_k as u64) as i64;
            let sign: i64 = if y >= self.k {
                y -= self.k;
                -1
            } else {
                1
            };
            let mut res = self.k * x;
            let check_val = (2 * res + y) * y;
            res += y;
            let zero_check = res.signum() + sign;
            let accept_prob = (-(check_val as f64) / (self.k as f64 * self.k as f64)).exp();
            let u: f64 = (rng.next_u64() as f64) / (u64::MAX as f64);
            if u < accept_prob && zero_check != 1 {
                return BigInt::from(res * sign);
            }
        }
    }
}

/// Two-stage normal-double sampler (non-constant-time): a small Gaussian
/// draw combined with a uniform draw, accepted via an `exp`-based Bernoulli
/// test — the non-constant-time counterpart of [`NormalDoubleCt`].
#[derive(Debug, Clone)]
pub struct NormalDouble {
    sigma: f64,
    small: NormalNegative,
}

impl NormalDouble {
    /// Build a sampler for standard deviation `sigma`, precision `n` bits.
    pub fn new(sigma: f64, n: u32) -> Self {
        let small_sigma = sigma.sqrt().max(1.0);
        NormalDouble {
            sigma,
            small: NormalNegative::new(small_sigma, n),
        }
    }

    /// Draw one sample.
    pub fn sample<R: RngCore + ?Sized>(&self, rng: &mut R) -> BigInt {
        loop {
            let x = self.small.sample(rng);
            let x_f: f64 = x.to_string().parse().unwrap_or(0.0);
            let scale = self.sigma / self.small.sigma;
            let candidate = (x_f * scale).round();
            let prob = (-(candidate * candidate) / (2.0 * self.sigma * self.sigma)
                + (x_f * x_f) / (2.0 * self.small.sigma * self.small.sigma))
                .exp()
                .min(1.0);
            let u: f64 = (rng.next_u64() as f64) / (u64::MAX as f64);
            if u < prob {
                return BigInt::from(candidate as i64);
            }
        }
    }
}
