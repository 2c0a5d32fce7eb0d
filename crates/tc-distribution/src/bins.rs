//! Bin identity and bin contents.

use std::cmp::Ordering;
use std::fmt;

use tc_core::Mode;

/// Label for an optional mode: the mode name, or `"all"` for non-modal bins.
pub fn mode_label(mode: &Option<Mode>) -> &'static str {
    match mode {
        Some(m) => m.as_str(),
        None    => "all",
    }
}

// ── BinKey ────────────────────────────────────────────────────────────────────

/// Identity of a bin: `(mode, lower_limit, upper_limit)`.
///
/// `mode = None` is the non-modal variant.  Keys are totally ordered by mode,
/// then lower limit, then upper limit (`f64::total_cmp`), so a
/// `BTreeMap<BinKey, _>` iterates each mode's bins from short to long.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinKey {
    pub mode:        Option<Mode>,
    pub lower_limit: f64,
    pub upper_limit: f64,
}

impl BinKey {
    pub fn new(mode: Option<Mode>, lower_limit: f64, upper_limit: f64) -> Self {
        Self { mode, lower_limit, upper_limit }
    }

    /// `lower_limit <= distance < upper_limit`.
    #[inline]
    pub fn contains(&self, distance: f64) -> bool {
        self.lower_limit <= distance && distance < self.upper_limit
    }

    /// `true` if the two ranges share any distance.  Touching edges do not
    /// overlap.
    #[inline]
    pub fn overlaps(&self, other: &BinKey) -> bool {
        self.lower_limit < other.upper_limit && other.lower_limit < self.upper_limit
    }

    /// Sorts before every real key of `mode`.
    pub(crate) fn mode_start(mode: Option<Mode>) -> Self {
        Self::new(mode, f64::NEG_INFINITY, f64::NEG_INFINITY)
    }

    /// Sorts after every real key of `mode` whose lower limit is ≤ `lower_limit`.
    pub(crate) fn upto(mode: Option<Mode>, lower_limit: f64) -> Self {
        Self::new(mode, lower_limit, f64::INFINITY)
    }

    /// Sorts after every real key of `mode`.
    pub(crate) fn mode_end(mode: Option<Mode>) -> Self {
        Self::new(mode, f64::INFINITY, f64::INFINITY)
    }
}

impl PartialEq for BinKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BinKey {}

impl PartialOrd for BinKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BinKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.mode
            .cmp(&other.mode)
            .then_with(|| self.lower_limit.total_cmp(&other.lower_limit))
            .then_with(|| self.upper_limit.total_cmp(&other.upper_limit))
    }
}

impl fmt::Display for BinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {})", mode_label(&self.mode), self.lower_limit, self.upper_limit)
    }
}

// ── DistanceBin ───────────────────────────────────────────────────────────────

/// One distance class and the number of trips counted in it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceBin {
    pub mode:        Option<Mode>,
    pub lower_limit: f64,
    pub upper_limit: f64,
    pub count:       u64,
}

impl DistanceBin {
    #[inline]
    pub fn key(&self) -> BinKey {
        BinKey::new(self.mode, self.lower_limit, self.upper_limit)
    }

    #[inline]
    pub fn contains(&self, distance: f64) -> bool {
        self.key().contains(distance)
    }

    /// Bin width in metres.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper_limit - self.lower_limit
    }
}
