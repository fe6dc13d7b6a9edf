//! C-ABI spanning-tree routine.
//!
//! These two symbols are the native side of the comparison. They are compiled into this
//! crate (so the adapter in [`crate::span::native`] can bind them directly) and exported
//! from the `cdylib` artifact, so any process can load them by name:
//!
//! ```c
//! int *min_span(int n_points, const int *pointvals);
//! void free_data(void *ptr);
//! ```
//!
//! `pointvals` holds `2 * n_points` coordinates interleaved as `x0, y0, x1, y1, ...`. The
//! result holds `2 * (n_points - 1)` point indices interleaved as `i0, j0, i1, j1, ...` in
//! the order the edges were chosen. It is allocated with the C allocator and must be handed
//! back to `free_data` exactly once.
//!
//! The scan runs directly over the flat buffer and shares no code with
//! [`crate::span::FragmentMerge`]; agreement between the two is checked by tests.
//!
//! # Safety
//!
//! Both functions are `unsafe`: the caller guarantees that `pointvals` points at
//! `2 * n_points` readable `c_int`s and that `free_data` only ever sees pointers returned by
//! `min_span`.

use std::os::raw::{c_int, c_void};
use std::ptr;

/// Compute the spanning tree of `n_points` interleaved points.
///
/// Returns null when `n_points < 2` (there is no edge to report) or when the result buffer
/// cannot be allocated.
///
/// # Safety
///
/// `pointvals` must be valid for reads of `2 * n_points` values.
#[no_mangle]
pub unsafe extern "C" fn min_span(n_points: c_int, pointvals: *const c_int) -> *mut c_int {
    if n_points < 2 || pointvals.is_null() {
        return ptr::null_mut();
    }
    let n = n_points as usize;
    // SAFETY: the caller guarantees `2 * n` readable values.
    let coords = std::slice::from_raw_parts(pointvals, 2 * n);

    let len = 2 * (n - 1);
    let edges = libc::malloc(len * std::mem::size_of::<c_int>()).cast::<c_int>();
    if edges.is_null() {
        return ptr::null_mut();
    }
    // SAFETY: freshly allocated with room for `len` values, exclusively ours until returned.
    let out = std::slice::from_raw_parts_mut(edges, len);

    let mut groups: Vec<usize> = (0..n).collect();
    for e in 0..n - 1 {
        let mut best = u128::MAX;
        let mut found = false;
        let (mut bi, mut bj) = (0usize, 0usize);

        for i in (0..2 * n).step_by(2) {
            for j in (i + 2..2 * n).step_by(2) {
                if groups[i / 2] == groups[j / 2] {
                    continue;
                }
                let dx = u64::from(coords[i].abs_diff(coords[j]));
                let dy = u64::from(coords[i + 1].abs_diff(coords[j + 1]));
                let dist2 = u128::from(dx * dx) + u128::from(dy * dy);
                if !found || dist2 < best {
                    found = true;
                    best = dist2;
                    bi = i / 2;
                    bj = j / 2;
                }
            }
        }

        // n - 1 rounds over n fragments always leave a candidate; anything else is a bug
        // that must not cross the boundary as a plausible-looking result.
        if !found {
            libc::free(edges.cast());
            return ptr::null_mut();
        }

        out[e * 2] = bi as c_int;
        out[e * 2 + 1] = bj as c_int;

        let keep = groups[bi];
        let absorbed = groups[bj];
        for g in groups.iter_mut() {
            if *g == absorbed {
                *g = keep;
            }
        }
    }

    edges
}

/// Release a buffer returned by [`min_span`]. Null is ignored.
///
/// # Safety
///
/// `ptr` must be null or a pointer returned by [`min_span`] that has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn free_data(ptr: *mut c_void) {
    if !ptr.is_null() {
        libc::free(ptr);
    }
}
