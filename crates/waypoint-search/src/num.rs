// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Solver Numeric Trait
//!
//! Unified numeric bounds for the cost type of every strategy. Costs are
//! signed primitive integers (`i16`, `i32`, `i64`, `isize`); callers with
//! real-valued distances scale and round them when building the matrix.
//!
//! Signedness is required even though costs are non-negative: it lets the
//! matrix reject negative input instead of wrapping it.

use num_traits::{FromPrimitive, PrimInt, Signed};
use std::hash::Hash;
use waypoint_core::num::{constants::Zero, ops::saturating_arithmetic::SaturatingAddVal};

/// A trait alias for numeric types that can be used as tour costs.
pub trait SolverNumeric:
    PrimInt
    + Signed
    + FromPrimitive
    + std::fmt::Debug
    + std::fmt::Display
    + Zero
    + SaturatingAddVal
    + Send
    + Sync
    + Hash
{
}

impl<T> SolverNumeric for T where
    T: PrimInt
        + Signed
        + FromPrimitive
        + std::fmt::Debug
        + std::fmt::Display
        + Zero
        + SaturatingAddVal
        + Send
        + Sync
        + Hash
{
}

#[cfg(test)]
mod tests {
    use super::SolverNumeric;

    fn accepts<T: SolverNumeric>(value: T) -> T {
        value.saturating_add_val(T::one())
    }

    #[test]
    fn test_signed_integers_are_solver_numeric() {
        assert_eq!(accepts(1i16), 2);
        assert_eq!(accepts(1i32), 2);
        assert_eq!(accepts(i64::MAX), i64::MAX);
        assert_eq!(accepts(0isize), 1);
    }
}
