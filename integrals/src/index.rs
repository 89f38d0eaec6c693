//! Triangular packing of symmetric orbital index pairs.
//!
//! A two-electron integral (ij|kl) is unchanged under i↔j, k↔l and ij↔kl.
//! Packing each pair into a single triangular index and then packing the two
//! pair indices the same way gives one slot per symmetry-unique integral.

/// Packed index of the unordered pair (i, j): `max(i,j)*(max(i,j)+1)/2 + min(i,j)`.
#[inline]
pub fn pair_index(i: usize, j: usize) -> usize {
    if i >= j {
        i * (i + 1) / 2 + j
    } else {
        j * (j + 1) / 2 + i
    }
}

/// Packed index of the integral (ij|kl).
#[inline]
pub fn compound_index(i: usize, j: usize, k: usize, l: usize) -> usize {
    pair_index(pair_index(i, j), pair_index(k, l))
}

/// Number of unordered orbital pairs for `n` orbitals.
#[inline]
pub fn num_pairs(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Length of a compressed two-electron array for `n` orbitals.
#[inline]
pub fn compressed_len(n: usize) -> usize {
    let npair = num_pairs(n);
    npair * (npair + 1) / 2
}

/// Visit every symmetry-unique quartet (i ≥ j, k ≥ l, ij ≥ kl) in ascending
/// compound-index order.
pub fn canonical_quartets(n: usize) -> impl Iterator<Item = (usize, usize, usize, usize)> {
    (0..n).flat_map(move |i| {
        (0..=i).flat_map(move |j| {
            (0..=i).flat_map(move |k| {
                let l_max = if i == k { j } else { k };
                (0..=l_max).map(move |l| (i, j, k, l))
            })
        })
    })
}
