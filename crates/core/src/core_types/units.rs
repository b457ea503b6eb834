//! Semantic unit types for type-safe physical quantity handling
//!
//! Newtype wrappers keep blast quantities from being mixed up: an equivalent
//! mass in kilograms cannot be passed where a radius in meters is expected,
//! and an overpressure in kilopascals cannot silently stand in for psi.
//!
//! # Design Philosophy
//! - All quantities use f64; the calculator contract is 64-bit throughout
//! - Implements common traits (Deref, Ord, Display, etc.)
//! - Explicit conversion methods between related units (kPa <-> psi)
//! - Serde support, serialized transparently as the bare number
//! - Total ordering via Ord trait (NaN handled as greater than all values)
//!
//! # Usage
//! ```
//! use hazard_zones_core::core_types::units::{Kilopascals, Psi};
//!
//! let p = Kilopascals::new(34.47);
//! let psi: Psi = p.into();
//! assert!((*psi - 5.0).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Kilopascals per pound-force per square inch
pub const KPA_PER_PSI: f64 = 6.894_757;

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// MASS
// ============================================================================

/// Mass in kilograms
///
/// Used for reference-equivalent quantities (kg of TNT).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Kilograms(f64);

impl Eq for Kilograms {}

impl PartialOrd for Kilograms {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Kilograms {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Kilograms {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Kilograms {
    /// Zero mass
    pub const ZERO: Kilograms = Kilograms(0.0);

    /// Create a new mass in kilograms. Asserts value >= 0 (non-negative mass).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Kilograms::new: negative mass is invalid");
        Kilograms(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Real cube root of the mass, exactly zero for a non-positive mass.
    ///
    /// This is the similitude base of the Hopkinson-Cranz law, in kg^(1/3).
    #[inline]
    #[must_use]
    pub fn cube_root(self) -> f64 {
        if self.0 > 0.0 {
            self.0.cbrt()
        } else {
            0.0
        }
    }
}

impl From<Kilograms> for f64 {
    fn from(k: Kilograms) -> f64 {
        k.0
    }
}

impl fmt::Display for Kilograms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} kg", self.0)
    }
}

// ============================================================================
// DISTANCE / AREA
// ============================================================================

/// Distance in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Meters(f64);

impl Eq for Meters {}

impl PartialOrd for Meters {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Meters {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Meters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Meters {
    /// Zero distance
    pub const ZERO: Meters = Meters(0.0);

    /// Create a new distance in meters
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Meters::new: negative distance is invalid");
        Meters(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Area of the disc with this radius
    #[inline]
    #[must_use]
    pub fn disc_area(self) -> SquareMeters {
        SquareMeters(std::f64::consts::PI * self.0 * self.0)
    }
}

impl From<Meters> for f64 {
    fn from(m: Meters) -> f64 {
        m.0
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} m", self.0)
    }
}

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct SquareMeters(f64);

impl Deref for SquareMeters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl SquareMeters {
    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Area in hectares (10,000 m² = 1 ha)
    #[inline]
    #[must_use]
    pub fn hectares(self) -> f64 {
        self.0 / 10_000.0
    }

    /// Difference of two areas, floored at zero
    #[inline]
    #[must_use]
    pub fn saturating_sub(self, rhs: SquareMeters) -> SquareMeters {
        SquareMeters((self.0 - rhs.0).max(0.0))
    }
}

impl fmt::Display for SquareMeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} m²", self.0)
    }
}

// ============================================================================
// PRESSURE
// ============================================================================

/// Overpressure in kilopascals (primary unit)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Kilopascals(f64);

impl Eq for Kilopascals {}

impl PartialOrd for Kilopascals {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Kilopascals {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Kilopascals {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Kilopascals {
    /// Create a new pressure in kilopascals
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Kilopascals(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to psi
    #[inline]
    #[must_use]
    pub fn to_psi(self) -> Psi {
        Psi(self.0 / KPA_PER_PSI)
    }
}

impl From<Kilopascals> for Psi {
    fn from(p: Kilopascals) -> Psi {
        p.to_psi()
    }
}

impl fmt::Display for Kilopascals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} kPa", self.0)
    }
}

/// Overpressure in pounds-force per square inch (secondary unit)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Psi(f64);

impl Eq for Psi {}

impl PartialOrd for Psi {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Psi {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Psi {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Psi {
    /// Create a new pressure in psi
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Psi(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to kilopascals
    #[inline]
    #[must_use]
    pub fn to_kilopascals(self) -> Kilopascals {
        Kilopascals(self.0 * KPA_PER_PSI)
    }
}

impl From<Psi> for Kilopascals {
    fn from(p: Psi) -> Kilopascals {
        p.to_kilopascals()
    }
}

impl fmt::Display for Psi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} psi", self.0)
    }
}

// ============================================================================
// FRACTIONS
// ============================================================================

/// Convert a percentage (0-100) to a fraction (0-1)
#[inline]
#[must_use]
pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

/// Convert a fraction (0-1) to a percentage (0-100)
#[inline]
#[must_use]
pub fn fraction_to_percent(fraction: f64) -> f64 {
    fraction * 100.0
}
