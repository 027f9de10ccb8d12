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

//! # Waypoint Search
//!
//! The contract every tour strategy implements, and the plumbing around it.
//!
//! ## Modules
//!
//! - `num`: `SolverNumeric`, the cost-type bound shared by all strategies.
//! - `solver`: the `TourSolver<T>` trait, "produce a tour from a matrix".
//! - `result`: `SolverResult<T>` (optimal or heuristic tour) and `SolverOutcome<T>`.
//! - `stats`: `SearchStatistics`, counters collected during one run.
//! - `monitor`: observers of the search lifecycle (log, composite, no-op).
//!
//! Every solve call is synchronous and owns all of its search state; nothing
//! is shared between calls.

pub mod monitor;
pub mod num;
pub mod result;
pub mod solver;
pub mod stats;
