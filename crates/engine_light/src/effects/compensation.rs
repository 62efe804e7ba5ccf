//! Multi-nozzle intensity compensation
//!
//! Every nozzle gets its own light pair, so a cluster of nozzles would add up
//! to an implausibly bright engine. The multiplier starts at 1 and loses a
//! halving step per nozzle, heading for one half.

/// Nozzle counts above this saturate at [`SATURATED_MULTIPLIER`]
pub const MAX_COMPENSATED_NOZZLES: usize = 8;

/// Multiplier used for very large nozzle clusters
pub const SATURATED_MULTIPLIER: f32 = 0.5;

/// Intensity multiplier for an engine with `nozzle_count` nozzles, in [0.5, 1.0].
pub fn compensate(nozzle_count: usize) -> f32 {
    if nozzle_count <= 1 {
        return 1.0;
    }
    if nozzle_count > MAX_COMPENSATED_NOZZLES {
        return SATURATED_MULTIPLIER;
    }

    let mut acc = 1.0_f32;
    let mut step = 0.25_f32;
    for _ in 0..nozzle_count {
        acc -= step;
        step *= 0.5;
    }
    acc
}
