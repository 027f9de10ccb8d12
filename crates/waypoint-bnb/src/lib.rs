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

//! Waypoint-BnB: exact best-first tour search
//!
//! Both exact strategies share one engine, `bnb::BestFirstSolver`, that
//! pops partial paths from a frontier in a fixed, total order and extends
//! them one node at a time until the first closed tour comes off the
//! frontier.
//!
//! - `bnb::BranchAndBoundSolver` queues paths by their cost.
//! - `bnb::AStarSolver` adds the MST lower bound of `eval::mst` to the key.
//!
//! Assumptions and guarantees
//! - Edge costs are non-negative (enforced by `CostMatrix`).
//! - Bounds must be admissible; `eval::mst` is admissible for any
//!   non-negative matrix, symmetric or not.
//! - Results are deterministic: ties in the frontier are broken by path
//!   length, last node and finally the path itself.
//!
//! Module map
//! - `bnb`: the engine and its two named variants.
//! - `eval`: lower bounds on the cost of completing a path.
//! - `frontier`: ordered-extraction containers.
//! - `node`: search nodes and their ordering.

pub mod bnb;
pub mod eval;
pub mod frontier;
pub mod node;
