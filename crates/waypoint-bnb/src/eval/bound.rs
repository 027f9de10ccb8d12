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

use num_traits::{PrimInt, Signed};
use waypoint_model::{index::NodeIndex, matrix::CostMatrix};

/// An estimate of the cost still needed to close a partial path into a tour.
///
/// The engine queues a non-closing extension under
/// `path_cost(path) + estimate_remaining(path)`. For the first popped closed
/// tour to be optimal the estimate must be admissible: it may never exceed
/// the cheapest way to visit every unvisited node and return to the depot.
pub trait LowerBound<T>
where
    T: PrimInt + Signed,
{
    /// Returns the name of the bound.
    fn name(&self) -> &str;

    /// Estimates the remaining cost from `path`, which starts at the depot
    /// and visits each of its nodes once.
    fn estimate_remaining(&mut self, matrix: &CostMatrix<T>, path: &[NodeIndex]) -> T;
}

impl<T> std::fmt::Debug for dyn LowerBound<T> + '_
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LowerBound({})", self.name())
    }
}

/// The trivial bound. Queues nodes by path cost alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZeroLowerBound;

impl<T> LowerBound<T> for ZeroLowerBound
where
    T: PrimInt + Signed,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "ZeroLowerBound"
    }

    #[inline(always)]
    fn estimate_remaining(&mut self, _matrix: &CostMatrix<T>, _path: &[NodeIndex]) -> T {
        T::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bound_is_zero() {
        let m = CostMatrix::<i64>::from_rows(vec![vec![0, 5], vec![5, 0]]).unwrap();
        let mut bound = ZeroLowerBound;
        assert_eq!(bound.estimate_remaining(&m, &[NodeIndex::new(0)]), 0);
        assert_eq!(LowerBound::<i64>::name(&bound), "ZeroLowerBound");
    }
}
