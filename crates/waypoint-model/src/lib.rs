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

//! # Waypoint Model
//!
//! The passive data of a closed-tour problem: `N` labeled nodes, a square
//! cost matrix between them, and node `0` (the depot) as the mandatory start
//! and end of every tour.
//!
//! ## Modules
//!
//! - `index`: `NodeIndex` and the `DEPOT` constant.
//! - `matrix`: `CostMatrix<T>` with shape validation and path costing.
//! - `tour`: `Tour<T>`, a validated closed tour with its cached cost.
//! - `loading`: a text loader that reads matrices from files or strings.

pub mod index;
pub mod loading;
pub mod matrix;
pub mod tour;
