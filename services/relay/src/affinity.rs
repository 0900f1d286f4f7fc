//! CPU pinning and the core-holding sleeper thread.
//!
//! Pinning is an optional capability: when the runtime cannot pin a
//! thread, the engine degrades to unpinned operation with a warning and
//! keeps running.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

/// Pin the calling thread to the given core id, best effort.
pub fn pin_current_thread(core: usize) {
    let Some(cores) = core_affinity::get_core_ids() else {
        warn!("CPU core enumeration unavailable; thread left unpinned");
        return;
    };
    match cores.into_iter().find(|candidate| candidate.id == core) {
        Some(id) => {
            if core_affinity::set_for_current(id) {
                debug!(core, "thread pinned");
            } else {
                warn!(core, "failed to pin thread; continuing unpinned");
            }
        }
        None => warn!(core, "no such CPU core; thread left unpinned"),
    }
}

/// Spawn the sleeper: a thread whose only job is to sit pinned on its core
/// so the scheduler keeps other work off it.
pub fn spawn_sleeper(core: usize) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("splice-sleeper".to_string())
        .spawn(move || {
            pin_current_thread(core);
            info!(core, "sleeper thread holding core");
            loop {
                thread::sleep(Duration::from_secs(24 * 60 * 60));
            }
        })
}
