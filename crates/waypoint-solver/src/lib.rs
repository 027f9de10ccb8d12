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

//! # Waypoint Solver
//!
//! The strategies that do not need the best-first engine, plus a single
//! entry point that picks any strategy of the workspace at runtime.
//!
//! ## Modules
//!
//! - `exhaustive`: every permutation, the correctness oracle for small `N`.
//! - `greedy`: nearest unvisited neighbor, fast and approximate.
//! - `random`: a seeded shuffle, the baseline.
//! - `strategy`: `Strategy` parsing, construction and `solve_rows`.
//!
//! ## Practical limits
//!
//! Exhaustive search is hopeless past roughly eleven nodes. Branch-and-bound
//! and A* (from `waypoint-bnb`) reach further because they prune, but their
//! frontier is uncapped and still grows exponentially on hard instances.

pub mod exhaustive;
pub mod greedy;
pub mod random;
pub mod strategy;
