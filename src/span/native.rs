//! Native backend: the same spanning tree, computed across a C-ABI boundary.
//!
//! A call goes through four steps:
//!
//! 1. **Encode** the points into a fresh `Vec<c_int>` of `2n` interleaved coordinates.
//! 2. **Invoke** `min_span(n, ptr)`.
//! 3. **Acquire** the returned pointer into a [`NativeEdges`] guard before anything else
//!    can happen.
//! 4. **Decode** `2(n - 1)` indices into edges; the guard's `Drop` hands the pointer back
//!    to `free_data`.
//!
//! Release lives only in `Drop` and the guard is neither `Clone` nor `Copy`, so the buffer
//! is freed exactly once on every exit path, unwinding included, and never touched after.
//!
//! The entry points are either the routine compiled into this crate or symbols loaded from a
//! shared library at startup (see [`NativeRoutine::resolve`]).
//!
//! Fewer than two points never cross the boundary.

use std::fmt;
use std::os::raw::{c_int, c_void};
use std::path::Path;
use std::ptr::NonNull;
use std::sync::Arc;

use libloading::Library;
use tracing::{debug, warn};

use super::traits::SpanningTree;
use super::Backend;
use crate::error::{Error, Result};
use crate::types::{Edge, Point};

/// Signature of the native spanning-tree entry point.
pub type MinSpanFn = unsafe extern "C" fn(c_int, *const c_int) -> *mut c_int;

/// Signature of the paired deallocation entry point.
pub type FreeDataFn = unsafe extern "C" fn(*mut c_void);

/// Environment variable naming a shared library to load instead of the bundled routine.
pub const LIBRARY_ENV: &str = "MINSPAN_NATIVE_LIB";

/// Resolved native entry points.
///
/// When the symbols come from [`NativeRoutine::load`], the library stays mapped for as long
/// as any clone of the routine is alive.
#[derive(Clone)]
pub struct NativeRoutine {
    min_span: MinSpanFn,
    free_data: FreeDataFn,
    library: Option<Arc<Library>>,
}

impl NativeRoutine {
    /// Resolve the routine at startup.
    ///
    /// If [`LIBRARY_ENV`] is set, the shared library it names is loaded. Otherwise the
    /// routine compiled into this crate is bound.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NativeUnavailable`] when the named library cannot be loaded, or when
    /// no library is named and the crate was built without the `native` feature. There is no
    /// fallback to the managed backend.
    pub fn resolve() -> Result<Self> {
        if let Some(path) = std::env::var_os(LIBRARY_ENV) {
            return Self::load(Path::new(&path));
        }
        Self::bundled()
    }

    /// Bind the routine compiled into this crate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NativeUnavailable`] when built without the `native` feature.
    pub fn bundled() -> Result<Self> {
        #[cfg(feature = "native")]
        {
            // SAFETY: the bundled symbols implement the documented contract.
            unsafe {
                Self::from_symbols(
                    Some(crate::ffi::min_span as MinSpanFn),
                    Some(crate::ffi::free_data as FreeDataFn),
                )
            }
        }
        #[cfg(not(feature = "native"))]
        {
            warn!("native routine requested but the `native` feature is disabled");
            Err(Error::NativeUnavailable {
                reason: "built without the `native` feature".to_string(),
            })
        }
    }

    /// Load `min_span` and `free_data` from a shared library, such as this crate's own
    /// `cdylib` artifact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NativeUnavailable`] if the library cannot be opened or lacks either
    /// symbol.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        // SAFETY: opening runs the library's initialisers; the caller points us at a build of
        // the native routine.
        let library = unsafe { Library::new(path) }.map_err(|e| {
            warn!(path = %path.display(), "cannot load native library: {e}");
            Error::NativeUnavailable {
                reason: format!("cannot load {}: {e}", path.display()),
            }
        })?;

        // SAFETY: both symbols are declared with the ABI the routine exports.
        let (min_span, free_data) = unsafe {
            (
                symbol::<MinSpanFn>(&library, b"min_span\0", path)?,
                symbol::<FreeDataFn>(&library, b"free_data\0", path)?,
            )
        };
        debug!(path = %path.display(), "loaded native library");

        Ok(Self {
            min_span,
            free_data,
            library: Some(Arc::new(library)),
        })
    }

    /// Bind externally resolved symbols.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NativeUnavailable`] if either symbol is missing.
    ///
    /// # Safety
    ///
    /// `min_span` must read exactly `2n` values and return either null or a buffer of
    /// `2(n - 1)` values that `free_data` releases. Both must stay callable for the lifetime
    /// of the returned routine.
    pub unsafe fn from_symbols(
        min_span: Option<MinSpanFn>,
        free_data: Option<FreeDataFn>,
    ) -> Result<Self> {
        match (min_span, free_data) {
            (Some(min_span), Some(free_data)) => Ok(Self {
                min_span,
                free_data,
                library: None,
            }),
            (None, _) => {
                warn!("native symbol `min_span` missing");
                Err(Error::NativeUnavailable {
                    reason: "symbol `min_span` not found".to_string(),
                })
            }
            (_, None) => {
                warn!("native symbol `free_data` missing");
                Err(Error::NativeUnavailable {
                    reason: "symbol `free_data` not found".to_string(),
                })
            }
        }
    }

    /// Whether the symbols come from a library loaded at runtime.
    pub fn is_loaded(&self) -> bool {
        self.library.is_some()
    }
}

/// Look up a NUL-terminated symbol and copy the function pointer out.
unsafe fn symbol<T: Copy>(library: &Library, name: &[u8], path: &Path) -> Result<T> {
    match library.get::<T>(name) {
        Ok(sym) => Ok(*sym),
        Err(e) => {
            let name = String::from_utf8_lossy(&name[..name.len() - 1]);
            warn!(path = %path.display(), "native symbol `{name}` missing: {e}");
            Err(Error::NativeUnavailable {
                reason: format!("symbol `{name}` not found in {}: {e}", path.display()),
            })
        }
    }
}

impl fmt::Debug for NativeRoutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeRoutine")
            .field("min_span", &(self.min_span as *const ()))
            .field("free_data", &(self.free_data as *const ()))
            .field("loaded", &self.library.is_some())
            .finish()
    }
}

/// Owned view of a result buffer returned by the native routine.
///
/// Holds exactly the pointer the routine returned and releases it through the routine's
/// `free_data` when dropped.
pub(crate) struct NativeEdges {
    ptr: NonNull<c_int>,
    len: usize,
    free_data: FreeDataFn,
}

impl NativeEdges {
    /// Take ownership of `len` values at `ptr`.
    ///
    /// # Panics
    ///
    /// A null `ptr` means the routine broke its contract; this stops execution.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live buffer of at least `len` values that `free_data`
    /// releases, and no one else may free or retain it.
    unsafe fn acquire(ptr: *mut c_int, len: usize, free_data: FreeDataFn) -> Self {
        let Some(ptr) = NonNull::new(ptr) else {
            panic!("native min_span returned null for a {len}-value result");
        };
        debug!(ptr = ?ptr, len, "acquired native edge buffer");
        Self {
            ptr,
            len,
            free_data,
        }
    }

    /// The raw interleaved index pairs.
    pub fn as_slice(&self) -> &[c_int] {
        // SAFETY: `acquire` guarantees `len` live values until drop.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Pair consecutive values into edges over `n_points` points.
    ///
    /// # Panics
    ///
    /// An index outside `0..n_points`, or a self-pair, means the routine broke its
    /// contract; this stops execution (the buffer is still released during unwinding).
    pub fn decode(&self, n_points: usize) -> Vec<Edge> {
        self.as_slice()
            .chunks_exact(2)
            .map(|pair| {
                let i = checked_index(pair[0], n_points);
                let j = checked_index(pair[1], n_points);
                assert_ne!(i, j, "native min_span returned a self-edge at {i}");
                Edge::new(i, j)
            })
            .collect()
    }
}

impl Drop for NativeEdges {
    fn drop(&mut self) {
        debug!(ptr = ?self.ptr, "releasing native edge buffer");
        // SAFETY: the pointer came from the routine paired with `free_data`, and this is the
        // only place it is released.
        unsafe { (self.free_data)(self.ptr.as_ptr().cast()) }
    }
}

fn checked_index(value: c_int, n_points: usize) -> usize {
    match usize::try_from(value) {
        Ok(index) if index < n_points => index,
        _ => panic!("native min_span returned index {value} for {n_points} points"),
    }
}

/// Flatten points into `x0, y0, x1, y1, ...`.
pub fn encode_points(points: &[Point]) -> Vec<c_int> {
    let mut buf = Vec::with_capacity(points.len() * 2);
    for p in points {
        buf.push(p.x);
        buf.push(p.y);
    }
    buf
}

/// Native backend over a resolved [`NativeRoutine`].
#[derive(Debug, Clone)]
pub struct NativeMst {
    routine: NativeRoutine,
}

impl NativeMst {
    /// Bind the routine chosen by [`NativeRoutine::resolve`].
    ///
    /// # Errors
    ///
    /// Fails closed with [`Error::NativeUnavailable`] if the routine cannot be resolved.
    pub fn new() -> Result<Self> {
        Ok(Self::with_routine(NativeRoutine::resolve()?))
    }

    /// Use an already resolved routine.
    pub fn with_routine(routine: NativeRoutine) -> Self {
        Self { routine }
    }
}

impl SpanningTree for NativeMst {
    fn min_span(&self, points: &[Point]) -> Result<Vec<Edge>> {
        let n = points.len();
        if n < 2 {
            return Ok(Vec::new());
        }
        let n_points = c_int::try_from(n).map_err(|_| Error::TooManyPoints {
            n,
            max: c_int::MAX as usize,
        })?;

        let coords = encode_points(points);
        debug_assert_eq!(coords.len(), 2 * n);

        // SAFETY: `coords` holds exactly `2n` values and outlives the call; the routine's
        // contract is vouched for by `NativeRoutine`'s constructors.
        let edges = unsafe {
            let raw = (self.routine.min_span)(n_points, coords.as_ptr());
            NativeEdges::acquire(raw, 2 * (n - 1), self.routine.free_data)
        };
        drop(coords);

        Ok(edges.decode(n))
    }

    fn backend(&self) -> Backend {
        Backend::Native
    }
}
