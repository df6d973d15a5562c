//! Direction context for bidirectional cleaners.
//!
//! Codecs decode by default and encode while an [`Uncleaner`] is running. The
//! direction lives in a thread-local counter rather than in any one codec, so a
//! codec nested anywhere inside an ordinary cleaner tree follows the direction
//! of the call that reached it. Each thread has its own counter, so threads
//! cleaning and uncleaning at the same time never see each other's mode.
//!
//! [`Uncleaner`]: crate::Uncleaner

use std::cell::Cell;
use std::marker::PhantomData;

thread_local! {
    static UNCLEAN_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Which way cleaners on the current thread are running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Raw input is being validated into clean values.
    Clean,
    /// Clean values are being converted back to raw form.
    Unclean,
}

/// Returns the direction for the current thread.
pub fn current() -> Direction {
    if is_uncleaning() {
        Direction::Unclean
    } else {
        Direction::Clean
    }
}

/// Returns true while any uncleaner is running on the current thread.
pub fn is_uncleaning() -> bool {
    depth() > 0
}

/// Returns how many uncleaners are currently nested on this thread.
pub fn depth() -> usize {
    UNCLEAN_DEPTH.with(Cell::get)
}

/// Holds the current thread in the unclean direction until dropped.
///
/// The counter is released in `Drop`, so it is restored on every exit path,
/// including early returns and unwinding panics. The guard is tied to the
/// thread that created it and cannot be sent elsewhere.
///
/// # Example
///
/// ```rust
/// use cleaners::direction::{self, Direction, UncleanGuard};
///
/// assert_eq!(direction::current(), Direction::Clean);
/// {
///     let _guard = UncleanGuard::enter();
///     assert_eq!(direction::current(), Direction::Unclean);
/// }
/// assert_eq!(direction::current(), Direction::Clean);
/// ```
#[must_use = "the direction reverts as soon as the guard is dropped"]
#[derive(Debug)]
pub struct UncleanGuard {
    _thread_bound: PhantomData<*const ()>,
}

impl UncleanGuard {
    /// Switches the current thread into the unclean direction.
    pub fn enter() -> Self {
        let depth = UNCLEAN_DEPTH.with(|cell| {
            let depth = cell.get() + 1;
            cell.set(depth);
            depth
        });
        tracing::trace!(depth, "entered unclean direction");
        Self {
            _thread_bound: PhantomData,
        }
    }
}

impl Drop for UncleanGuard {
    fn drop(&mut self) {
        let depth = UNCLEAN_DEPTH.with(|cell| {
            let depth = cell.get().saturating_sub(1);
            cell.set(depth);
            depth
        });
        tracing::trace!(depth, "left unclean direction");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic;
    use std::thread;

    #[test]
    fn test_starts_clean() {
        assert_eq!(current(), Direction::Clean);
        assert_eq!(depth(), 0);
        assert!(!is_uncleaning());
    }

    #[test]
    fn test_guards_nest() {
        let outer = UncleanGuard::enter();
        assert_eq!(depth(), 1);
        {
            let _inner = UncleanGuard::enter();
            assert_eq!(depth(), 2);
            assert_eq!(current(), Direction::Unclean);
        }
        assert_eq!(depth(), 1);
        drop(outer);
        assert_eq!(depth(), 0);
        assert_eq!(current(), Direction::Clean);
    }

    #[test]
    fn test_released_on_panic() {
        let result = panic::catch_unwind(|| {
            let _guard = UncleanGuard::enter();
            panic!("cleaner blew up");
        });
        assert!(result.is_err());
        assert_eq!(depth(), 0);
    }

    #[test]
    fn test_direction_is_per_thread() {
        let _guard = UncleanGuard::enter();
        let other = thread::spawn(current).join().unwrap();
        assert_eq!(other, Direction::Clean);
        assert_eq!(current(), Direction::Unclean);
    }
}
