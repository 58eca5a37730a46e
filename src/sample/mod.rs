//! L3: randomness — uniform-in-range sampling and discrete Gaussian
//! samplers, grounded on `examples/original_source/src/sample/`.

pub mod gaussian;
pub mod uniform;

pub use gaussian::{NormalCdt, NormalCumulative, NormalDouble, NormalDoubleCt, NormalNegative};
pub use uniform::{bit_sample, uniform_mod, uniform_range_vec, uniform_vec};
