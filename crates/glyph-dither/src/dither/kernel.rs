//! Error diffusion kernel definitions.
//!
//! Each kernel specifies how the quantization error of one cell is shared
//! among the cells that have not been visited yet in a left-to-right,
//! top-to-bottom scan.

/// An error diffusion kernel.
///
/// Each entry is `(dx, dy, weight)`; the neighbor at `(x + dx, y + dy)`
/// receives `error * weight / divisor`. The total propagated fraction is
/// `sum(weights) / divisor`.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries, `dy >= 0`.
    pub entries: &'static [(i32, i32, u8)],
    /// Common denominator of all weights.
    pub divisor: u8,
}

impl Kernel {
    /// Fraction of the quantization error this kernel hands on.
    pub fn propagation(&self) -> f32 {
        let total: u32 = self.entries.iter().map(|&(_, _, w)| w as u32).sum();
        total as f32 / self.divisor as f32
    }
}

/// Floyd-Steinberg dithering kernel.
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
};

/// Atkinson dithering kernel.
///
/// Six neighbors at 1/8 each, so only 6/8 of the error survives. The
/// remaining quarter is dropped, which lightens the result.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),  // right
        (2, 0, 1),  // two right
        (-1, 1, 1), // bottom-left
        (0, 1, 1),  // bottom
        (1, 1, 1),  // bottom-right
        (0, 2, 1),  // two below
    ],
    divisor: 8,
};

/// Sierra two-row dithering kernel.
///
/// ```text
///            X   4   3
///    1   2   3   2   1
/// ```
pub const SIERRA_TWO_ROW: Kernel = Kernel {
    entries: &[
        (1, 0, 4),
        (2, 0, 3),
        (-2, 1, 1),
        (-1, 1, 2),
        (0, 1, 3),
        (1, 1, 2),
        (2, 1, 1),
    ],
    divisor: 16,
};
