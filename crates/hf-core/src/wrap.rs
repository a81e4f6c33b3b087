/// Maps a signed index onto a ring of `len` cells.
///
/// Returns `None` for an empty ring.
pub fn wrap_index(i: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(i.rem_euclid(len as isize) as usize)
}

/// Steps `delta` cells from `i` on a ring of `len` cells.
///
/// Caller must guarantee `len > 0` and `i < len`; any `Grid` dimension
/// satisfies this.
#[inline]
pub fn wrap_offset(i: usize, delta: isize, len: usize) -> usize {
    debug_assert!(len > 0 && i < len, "wrap_offset outside ring");
    (i as isize + delta).rem_euclid(len as isize) as usize
}
