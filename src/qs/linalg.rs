// src/qs/linalg.rs

use bitvec::prelude::*;
use rayon::prelude::*;

/// GF(2) matrix of `m` rows by `n` columns, bit-packed per row.
#[derive(Debug, Clone)]
pub struct ParityMatrix {
    pub rows: Vec<BitVec<u8, Lsb0>>,
    pub n_cols: usize,
}

impl ParityMatrix {
    pub fn from_rows(rows: Vec<BitVec<u8, Lsb0>>) -> Self {
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        debug_assert!(rows.iter().all(|r| r.len() == n_cols));
        ParityMatrix { rows, n_cols }
    }

    pub fn m_rows(&self) -> usize {
        self.rows.len()
    }
}

/// `target ^= source`, bit by bit. `bitvec`'s own XOR operators expect an
/// owned `IntoIterator<Item = bool>`, which a borrowed row doesn't satisfy;
/// going through `get`/`set` sidesteps that without cloning the source.
pub fn xor_row_in_place(target: &mut BitSlice<u8, Lsb0>, source: &BitSlice<u8, Lsb0>) {
    debug_assert_eq!(target.len(), source.len());
    for i in 0..target.len() {
        let flipped = target[i] ^ source[i];
        target.set(i, flipped);
    }
}

/// Gaussian elimination over GF(2), carrying a transform matrix `T` so that
/// every zero row of the reduced parity matrix (processed or not) yields a
/// dependency: a subset of original rows whose parity vectors XOR to zero.
///
/// Mirrors `gaussian_elimination_all` in the sieve's linear-algebra core:
/// column-by-column pivot search, XOR the pivot row into every other row
/// that has a 1 in that column (parallelized across rows), track the trace
/// in `T`.
pub fn eliminate(matrix: &ParityMatrix) -> Vec<BitVec<u8, Lsb0>> {
    let m = matrix.m_rows();
    let n = matrix.n_cols;

    let mut rows: Vec<BitVec<u8, Lsb0>> = matrix.rows.clone();
    let mut transform: Vec<BitVec<u8, Lsb0>> = (0..m)
        .map(|i| {
            let mut row = bitvec![u8, Lsb0; 0; m];
            row.set(i, true);
            row
        })
        .collect();

    let mut processed = vec![false; m];

    for col in 0..n {
        let pivot = (0..m).find(|&r| !processed[r] && rows[r][col]);
        let pivot = match pivot {
            Some(p) => p,
            None => continue,
        };
        processed[pivot] = true;

        let (pivot_row, pivot_transform) = (rows[pivot].clone(), transform[pivot].clone());

        // par_iter_mut hands each worker a disjoint element of the Vec, so
        // every row can XOR itself against the pivot without aliasing.
        rows.par_iter_mut()
            .zip(transform.par_iter_mut())
            .enumerate()
            .for_each(|(r, (row, trow))| {
                if r != pivot && row[col] {
                    xor_row_in_place(row, &pivot_row);
                    xor_row_in_place(trow, &pivot_transform);
                }
            });
    }

    let mut dependencies = Vec::new();
    for i in 0..m {
        if rows[i].not_any() {
            dependencies.push(transform[i].clone());
        }
    }
    dependencies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_from_exponents(exponents: &[u32]) -> BitVec<u8, Lsb0> {
        exponents.iter().map(|&e| e % 2 == 1).collect()
    }

    /// Textbook fixture: 7 relations over factor base
    /// {2,3,5,7,11,13,17,19}, parity exponents reduced mod 2. At least one
    /// non-empty dependency must XOR to the zero vector.
    #[test]
    fn textbook_dependency_extraction() {
        let relations: Vec<[u32; 8]> = vec![
            [0, 0, 5, 0, 0, 0, 0, 1],
            [2, 0, 1, 0, 1, 1, 0, 1],
            [0, 2, 0, 0, 0, 3, 0, 0],
            [6, 2, 0, 0, 1, 0, 0, 0],
            [1, 0, 0, 0, 0, 0, 0, 1],
            [5, 0, 1, 0, 0, 2, 0, 0],
            [0, 0, 2, 2, 0, 1, 0, 0],
        ];
        let rows: Vec<BitVec<u8, Lsb0>> = relations.iter().map(|r| row_from_exponents(r)).collect();
        let matrix = ParityMatrix::from_rows(rows.clone());
        let dependencies = eliminate(&matrix);

        assert!(!dependencies.is_empty());
        for dep in &dependencies {
            assert!(dep.any(), "dependency mask must select at least one relation");
            let mut xor = bitvec![u8, Lsb0; 0; rows[0].len()];
            for (i, bit) in dep.iter().enumerate() {
                if *bit {
                    xor_row_in_place(&mut xor, &rows[i]);
                }
            }
            assert!(xor.not_any(), "selected rows must XOR to zero");
        }
    }

    #[test]
    fn no_dependency_when_rows_are_independent() {
        // Identity-like rows over 3 columns: no subset XORs to zero except
        // the empty set, which this function never emits.
        let rows: Vec<BitVec<u8, Lsb0>> = vec![
            bitvec![u8, Lsb0; 1, 0, 0],
            bitvec![u8, Lsb0; 0, 1, 0],
            bitvec![u8, Lsb0; 0, 0, 1],
        ];
        let matrix = ParityMatrix::from_rows(rows);
        let dependencies = eliminate(&matrix);
        assert!(dependencies.is_empty());
    }
}
