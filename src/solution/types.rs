//! Solution representation.

use crate::error::{Result, SearchError};
use rand::Rng;
use std::fmt;

/// Lower bound of the uniform range used by [`Solution::random`] for real encodings.
pub const REAL_LOWER: f64 = -5.0;
/// Upper bound (exclusive) of the uniform range for real encodings.
pub const REAL_UPPER: f64 = 5.0;

/// The three supported encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolutionKind {
    /// Fixed-length boolean vector.
    Binary,
    /// Fixed-length real vector.
    Real,
    /// Permutation of `0..n`.
    Permutation,
}

impl fmt::Display for SolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolutionKind::Binary => "binary",
            SolutionKind::Real => "real",
            SolutionKind::Permutation => "permutation",
        };
        f.write_str(name)
    }
}

/// The vector a solution is made of.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    Binary(Vec<bool>),
    Real(Vec<f64>),
    Permutation(Vec<usize>),
}

impl Encoding {
    /// Kind tag of this encoding.
    pub fn kind(&self) -> SolutionKind {
        match self {
            Encoding::Binary(_) => SolutionKind::Binary,
            Encoding::Real(_) => SolutionKind::Real,
            Encoding::Permutation(_) => SolutionKind::Permutation,
        }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        match self {
            Encoding::Binary(bits) => bits.len(),
            Encoding::Real(values) => values.len(),
            Encoding::Permutation(order) => order.len(),
        }
    }

    /// Returns `true` for a zero-length encoding.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A candidate answer: an encoding plus the value cached by the last
/// evaluation.
///
/// The cached value is `None` until [`Problem::evaluate`] runs on this
/// instance. Any mutable access to the encoding clears it, so a stale
/// value can never survive an in-place edit.
///
/// Equality compares encodings only; the cached value is ignored.
///
/// [`Problem::evaluate`]: crate::problem::Problem::evaluate
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    encoding: Encoding,
    value: Option<f64>,
}

impl Solution {
    /// Wraps an encoding in an unevaluated solution.
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            value: None,
        }
    }

    /// Binary solution from a bit vector.
    pub fn binary(bits: Vec<bool>) -> Self {
        Self::new(Encoding::Binary(bits))
    }

    /// Real solution from a coordinate vector.
    pub fn real(values: Vec<f64>) -> Self {
        Self::new(Encoding::Real(values))
    }

    /// Permutation solution.
    ///
    /// Fails with [`SearchError::Config`] if `order` is not a permutation
    /// of `0..order.len()`.
    pub fn permutation(order: Vec<usize>) -> Result<Self> {
        let n = order.len();
        let mut seen = vec![false; n];
        for &v in &order {
            if v >= n || seen[v] {
                return Err(SearchError::config(format!(
                    "{order:?} is not a permutation of 0..{n}"
                )));
            }
            seen[v] = true;
        }
        Ok(Self::new(Encoding::Permutation(order)))
    }

    /// The "empty" solution of a kind: all bits cleared, all coordinates
    /// zero, or the identity permutation.
    pub fn empty(kind: SolutionKind, dimension: usize) -> Self {
        let encoding = match kind {
            SolutionKind::Binary => Encoding::Binary(vec![false; dimension]),
            SolutionKind::Real => Encoding::Real(vec![0.0; dimension]),
            SolutionKind::Permutation => Encoding::Permutation((0..dimension).collect()),
        };
        Self::new(encoding)
    }

    pub fn kind(&self) -> SolutionKind {
        self.encoding.kind()
    }

    pub fn dimension(&self) -> usize {
        self.encoding.len()
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    /// Mutable access to the encoding. Clears the cached value.
    pub fn encoding_mut(&mut self) -> &mut Encoding {
        self.value = None;
        &mut self.encoding
    }

    pub fn as_bits(&self) -> Option<&[bool]> {
        match &self.encoding {
            Encoding::Binary(bits) => Some(bits),
            _ => None,
        }
    }

    pub fn as_reals(&self) -> Option<&[f64]> {
        match &self.encoding {
            Encoding::Real(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_permutation(&self) -> Option<&[usize]> {
        match &self.encoding {
            Encoding::Permutation(order) => Some(order),
            _ => None,
        }
    }

    /// Value cached by the last evaluation, if any.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Whether this instance carries an evaluation result.
    pub fn is_evaluated(&self) -> bool {
        self.value.is_some()
    }

    pub(crate) fn set_value(&mut self, value: f64) {
        self.value = Some(value);
    }

    /// Samples a fresh, unevaluated solution of the same kind and dimension.
    ///
    /// - binary: independent fair bits
    /// - real: independent uniform coordinates in `[-5, 5)`
    /// - permutation: uniformly random permutation
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Solution {
        let n = self.dimension();
        let encoding = match self.kind() {
            SolutionKind::Binary => Encoding::Binary((0..n).map(|_| rng.random_bool(0.5)).collect()),
            SolutionKind::Real => Encoding::Real(
                (0..n)
                    .map(|_| rng.random_range(REAL_LOWER..REAL_UPPER))
                    .collect(),
            ),
            SolutionKind::Permutation => {
                let mut order: Vec<usize> = (0..n).collect();
                crate::random::shuffle(&mut order, rng);
                Encoding::Permutation(order)
            }
        };
        Solution::new(encoding)
    }
}

impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.encoding == other.encoding
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.encoding {
            Encoding::Binary(bits) => {
                for &b in bits {
                    f.write_str(if b { "1" } else { "0" })?;
                }
                Ok(())
            }
            Encoding::Real(values) => {
                let parts: Vec<String> = values.iter().map(|v| format!("{v:.4}")).collect();
                f.write_str(&parts.join(","))
            }
            Encoding::Permutation(order) => {
                let parts: Vec<String> = order.iter().map(|v| v.to_string()).collect();
                f.write_str(&parts.join(","))
            }
        }
    }
}
