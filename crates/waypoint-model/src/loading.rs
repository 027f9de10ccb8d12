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

//! Cost matrix loader.
//!
//! Reads a whitespace-delimited text stream into a validated `CostMatrix`.
//! The first token is the node count `N`; the next `N * N` tokens are the
//! travel costs in row-major order. Line breaks carry no meaning, so a
//! matrix may be written one row per line or all on one line. Everything
//! after a `#` up to the end of the line is a comment.
//!
//! ```raw
//! 3          # nodes
//! 0 1 9      # from node 0
//! 1 0 1
//! 9 1 0
//! ```
//!
//! The loader accepts any `BufRead`, file path, raw reader, or string slice.

use crate::matrix::{CostMatrix, MatrixError};
use num_traits::{PrimInt, Signed};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};
use waypoint_core::num::ops::saturating_arithmetic::SaturatingAddVal;

/// Upper bound on the number of costs reserved before any are read.
const MAX_PREALLOCATED_COSTS: usize = 1 << 16;

/// The error type for the matrix loading process.
#[derive(Debug, thiserror::Error)]
pub enum MatrixLoaderError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input stream ended before all `N * N` costs were read.
    #[error("Unexpected end of file while parsing cost matrix")]
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseTokenError),
    /// The node count is zero or does not fit `usize`.
    #[error("Node count must be a positive integer")]
    InvalidDimensions,
    /// The parsed costs do not form a valid matrix.
    #[error("Invalid matrix: {0}")]
    Matrix(#[from] MatrixError),
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Could not parse token '{token}' as type {type_name}")]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "i64").
    pub type_name: &'static str,
}

/// A configurable loader for cost matrices.
///
/// # Configuration
/// * `require_symmetric`: reject matrices where `cost(i, j) != cost(j, i)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatrixLoader {
    require_symmetric: bool,
}

impl MatrixLoader {
    /// Creates a new `MatrixLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether asymmetric matrices are rejected.
    #[inline]
    pub fn require_symmetric(mut self, yes: bool) -> Self {
        self.require_symmetric = yes;
        self
    }

    /// Loads a matrix from a type implementing `BufRead`.
    pub fn from_bufread<T, R>(&self, rdr: R) -> Result<CostMatrix<T>, MatrixLoaderError>
    where
        T: PrimInt + Signed + SaturatingAddVal + FromStr,
        R: BufRead,
    {
        let mut sc = Scanner::new(rdr);

        let num_nodes: usize = sc.next()?;
        if num_nodes == 0 {
            return Err(MatrixLoaderError::InvalidDimensions);
        }
        let len = num_nodes
            .checked_mul(num_nodes)
            .ok_or(MatrixLoaderError::InvalidDimensions)?;

        // The header is untrusted; truncated input fails with `UnexpectedEof`.
        let mut costs = Vec::with_capacity(len.min(MAX_PREALLOCATED_COSTS));
        for _ in 0..len {
            costs.push(sc.next::<T>()?);
        }

        let matrix = CostMatrix::from_flat(num_nodes, costs)?;

        if self.require_symmetric {
            if let Some((from, to)) = matrix.first_asymmetry() {
                return Err(MatrixError::Asymmetric {
                    from: from.get(),
                    to: to.get(),
                }
                .into());
            }
        }

        Ok(matrix)
    }

    /// Loads a matrix from a file path.
    #[inline]
    pub fn from_path<T, P>(&self, path: P) -> Result<CostMatrix<T>, MatrixLoaderError>
    where
        T: PrimInt + Signed + SaturatingAddVal + FromStr,
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a matrix from a generic reader.
    #[inline]
    pub fn from_reader<T, R>(&self, r: R) -> Result<CostMatrix<T>, MatrixLoaderError>
    where
        T: PrimInt + Signed + SaturatingAddVal + FromStr,
        R: Read,
    {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a matrix from a string slice.
    #[inline]
    pub fn from_str<T>(&self, s: &str) -> Result<CostMatrix<T>, MatrixLoaderError>
    where
        T: PrimInt + Signed + SaturatingAddVal + FromStr,
    {
        self.from_reader(s.as_bytes())
    }
}

/// Reads whitespace-delimited tokens, skipping `#` comments.
struct Scanner<R> {
    rdr: R,
    buf: String,
    pos: usize,
}

impl<R: BufRead> Scanner<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            pos: 0,
        }
    }

    /// Refills the line buffer. Returns `Ok(false)` on EOF.
    #[inline]
    fn fill_line(&mut self) -> Result<bool, MatrixLoaderError> {
        self.buf.clear();
        self.pos = 0;
        let n = self.rdr.read_line(&mut self.buf)?;
        // Comments run to the end of the line.
        if let Some(hash) = self.buf.find('#') {
            self.buf.truncate(hash);
        }
        Ok(n > 0)
    }

    fn next<T>(&mut self) -> Result<T, MatrixLoaderError>
    where
        T: FromStr,
    {
        loop {
            let rest = &self.buf[self.pos..];
            let trimmed = rest.trim_start();
            if trimmed.is_empty() {
                if !self.fill_line()? {
                    return Err(MatrixLoaderError::UnexpectedEof);
                }
                continue;
            }

            let start = self.pos + (rest.len() - trimmed.len());
            let end = trimmed
                .find(char::is_whitespace)
                .map_or(self.buf.len(), |offset| start + offset);
            self.pos = end;

            let token = &self.buf[start..end];
            return token.parse::<T>().map_err(|_| {
                ParseTokenError {
                    token: token.to_owned(),
                    type_name: std::any::type_name::<T>(),
                }
                .into()
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::NodeIndex;

    const LINE3: &str = r#"
        3           # N = 3 nodes
        0 1 9       # from node 0
        1 0 1
        9 1 0
    "#;

    fn ni(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    #[test]
    fn test_loads_and_maps_correctly() {
        let m: CostMatrix<i64> = MatrixLoader::new().from_str(LINE3).expect("Failed to load");
        assert_eq!(m.num_nodes(), 3);
        assert_eq!(m.cost(ni(0), ni(2)), 9);
        assert_eq!(m.cost(ni(2), ni(1)), 1);
    }

    #[test]
    fn test_single_line_input() {
        let m: CostMatrix<i32> = MatrixLoader::new().from_str("2 0 4 7 0").unwrap();
        assert_eq!(m.cost(ni(0), ni(1)), 4);
        assert_eq!(m.cost(ni(1), ni(0)), 7);
    }

    #[test]
    fn test_require_symmetric() {
        let data = "2 0 4 7 0";
        let res: Result<CostMatrix<i64>, _> =
            MatrixLoader::new().require_symmetric(true).from_str(data);
        match res {
            Err(MatrixLoaderError::Matrix(MatrixError::Asymmetric { from, to })) => {
                assert_eq!((from, to), (0, 1));
            }
            other => panic!("Expected Asymmetric error, got {:?}", other),
        }

        let ok: CostMatrix<i64> = MatrixLoader::new()
            .require_symmetric(true)
            .from_str(LINE3)
            .unwrap();
        assert!(ok.is_symmetric());
    }

    #[test]
    fn test_zero_nodes_is_invalid() {
        let res: Result<CostMatrix<i64>, _> = MatrixLoader::new().from_str("0");
        assert!(matches!(res, Err(MatrixLoaderError::InvalidDimensions)));
    }

    #[test]
    fn test_huge_header_without_costs_is_an_error() {
        let res: Result<CostMatrix<i64>, _> = MatrixLoader::new().from_str("2000000000");
        assert!(matches!(res, Err(MatrixLoaderError::UnexpectedEof)));

        let res: Result<CostMatrix<i64>, _> = MatrixLoader::new().from_str("300 0 1 2");
        assert!(matches!(res, Err(MatrixLoaderError::UnexpectedEof)));
    }

    #[test]
    fn test_overflowing_header_is_invalid() {
        let header = usize::MAX.to_string();
        let res: Result<CostMatrix<i64>, _> = MatrixLoader::new().from_str(&header);
        assert!(matches!(res, Err(MatrixLoaderError::InvalidDimensions)));
    }

    #[test]
    fn test_truncated_input() {
        let res: Result<CostMatrix<i64>, _> = MatrixLoader::new().from_str("2 0 1 # missing\n 1");
        assert!(matches!(res, Err(MatrixLoaderError::UnexpectedEof)));
    }

    #[test]
    fn test_negative_cost_surfaces_matrix_error() {
        let res: Result<CostMatrix<i64>, _> = MatrixLoader::new().from_str("2 0 -1 1 0");
        assert!(matches!(
            res,
            Err(MatrixLoaderError::Matrix(MatrixError::NegativeCost { from: 0, to: 1 }))
        ));
    }

    #[test]
    fn test_parse_error_structure() {
        let res: Result<CostMatrix<i64>, _> = MatrixLoader::new().from_str("2 0 garbage 1 0");
        match res {
            Err(MatrixLoaderError::Parse(e)) => {
                assert_eq!(e.token, "garbage");
                assert!(e.type_name.contains("i64"));
            }
            other => panic!("Expected Parse error with context, got {:?}", other),
        }
    }

    #[test]
    fn test_comment_glued_to_token() {
        let m: CostMatrix<i64> = MatrixLoader::new().from_str("1#one node\n0").unwrap();
        assert_eq!(m.num_nodes(), 1);
    }
}
