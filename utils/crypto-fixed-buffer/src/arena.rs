//! One process-wide scratch buffer for callers that want to keep a single
//! 68-byte staging area for every computation.
//!
//! The lock only serialises access to the bytes. A partial block lives in the
//! arena between calls, so two computations must still not be interleaved
//! through it: finish one (Final) before feeding another.

use log::trace;
use spin::Mutex;

use super::ScratchBuffer;

static ARENA: Mutex<ScratchBuffer> = Mutex::new(ScratchBuffer::new());

/// Run `f` with exclusive access to the shared scratch buffer.
///
/// Spins while another thread holds the arena; calling it again from inside
/// `f` never returns.
pub fn with_arena<R, F>(f: F) -> R
    where F: FnOnce(&mut ScratchBuffer) -> R
{
    let mut guard = ARENA.lock();
    trace!("shared scratch arena acquired");
    f(&mut guard)
}

/// Like `with_arena`, but returns `None` instead of waiting when the arena
/// is already held.
pub fn try_with_arena<R, F>(f: F) -> Option<R>
    where F: FnOnce(&mut ScratchBuffer) -> R
{
    let mut guard = ARENA.try_lock()?;
    trace!("shared scratch arena acquired");
    Some(f(&mut guard))
}
