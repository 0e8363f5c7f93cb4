//! Single-instance guard for the engine.
//!
//! Only one engine may exist per slot. Callers hold an [`EngineSlot`]
//! (usually a `static`) and pass it around explicitly. `acquire` hands out an
//! [`EngineInstance`] that frees the slot when dropped or released.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    AlreadyExists,
    NotCreated,
    NullInstance,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyExists => f.write_str("engine already exists"),
            Self::NotCreated => f.write_str("engine not created"),
            Self::NullInstance => f.write_str("engine instance is null"),
        }
    }
}

impl std::error::Error for EngineError {}

pub struct EngineSlot {
    occupied: AtomicBool,
}

impl EngineSlot {
    pub const fn new() -> Self {
        Self {
            occupied: AtomicBool::new(false),
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied.load(Ordering::Acquire)
    }

    pub fn acquire(&self) -> Result<EngineInstance<'_>, EngineError> {
        self.occupied
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| EngineError::AlreadyExists)?;
        log::debug!("engine instance created");
        Ok(EngineInstance { slot: self })
    }

    /// Explicit teardown. `None` stands in for a null handle.
    pub fn release(&self, instance: Option<EngineInstance<'_>>) -> Result<(), EngineError> {
        if !self.is_occupied() {
            return Err(EngineError::NotCreated);
        }
        let instance = instance.ok_or(EngineError::NullInstance)?;
        drop(instance);
        Ok(())
    }
}

impl Default for EngineSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof of ownership of the engine slot.
#[derive(Debug)]
pub struct EngineInstance<'a> {
    slot: &'a EngineSlot,
}

impl Drop for EngineInstance<'_> {
    fn drop(&mut self) {
        self.slot.occupied.store(false, Ordering::Release);
        log::debug!("engine instance destroyed");
    }
}

impl std::fmt::Debug for EngineSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineSlot")
            .field("occupied", &self.is_occupied())
            .finish()
    }
}
