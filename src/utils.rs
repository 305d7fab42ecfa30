// src/utils.rs

#[inline(always)]
pub fn square_index(rank: usize, file: usize) -> usize {
    rank * 8 + file
}

/// Removes and returns the lowest set square. Caller ensures `bb != 0`.
#[inline(always)]
pub fn pop_lsb(bb: &mut u64) -> u8 {
    debug_assert!(*bb != 0, "pop_lsb on empty bitboard");
    let sq = bb.trailing_zeros() as u8;
    *bb &= *bb - 1;
    sq
}
