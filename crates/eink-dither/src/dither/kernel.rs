//! Error diffusion kernel definitions.
//!
//! A kernel specifies how the quantization error of one pixel is
//! distributed to the neighbors that have not been visited yet.

/// An error diffusion kernel.
///
/// Each entry is an offset (dx, dy) and a weight. A neighbor receives
/// `error * weight / divisor`, computed in integer arithmetic.
///
/// # Buffer Sizing
///
/// The `max_dy` field indicates how many rows ahead the kernel reaches,
/// which determines the error buffer depth needed: `max_dy + 1` rows.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries for error diffusion.
    ///
    /// - `dx`: horizontal offset (positive = right)
    /// - `dy`: vertical offset (always >= 0, below current row)
    /// - `weight`: numerator of the share of error this neighbor receives
    pub entries: &'static [(i32, i32, i32)],

    /// Common denominator of all weights.
    pub divisor: i32,

    /// Maximum dy value in entries.
    pub max_dy: usize,
}

impl Kernel {
    /// Sum of all weights; equals `divisor` when 100% of the error propagates.
    pub fn total_weight(&self) -> i32 {
        self.entries.iter().map(|&(_, _, w)| w).sum()
    }
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    max_dy: 1,
};
