//! Global interrupt gate.
//!
//! [`enter`] disables interrupt delivery, [`exit`] enables it again. This is a
//! binary gate and not a counting lock: `enter(); enter(); exit();` leaves
//! interrupts enabled. Keep the bracketed region to a handful of register
//! accesses, the free-running bit-bang clock depends on interrupt latency
//! staying low.

/// Disable global interrupt delivery.
#[inline(always)]
pub fn enter() {
    backend::disable();
}

/// Enable global interrupt delivery.
#[inline(always)]
pub fn exit() {
    backend::enable();
}

/// Whether global interrupt delivery is currently enabled.
#[inline(always)]
pub fn is_enabled() -> bool {
    backend::is_enabled()
}

/// Run `f` with interrupts disabled, enabling them afterwards.
///
/// Interrupts are enabled on return even if they were disabled on entry.
#[inline(always)]
pub fn with<R>(f: impl FnOnce() -> R) -> R {
    enter();
    let r = f();
    exit();
    r
}

#[cfg(feature = "board")]
mod backend {
    #[inline(always)]
    pub fn disable() {
        avr_device::interrupt::disable();
    }

    #[inline(always)]
    pub fn enable() {
        // SAFETY: the gate is documented as non-nesting, callers of `exit`
        // accept that every bracketed region ends with interrupts enabled.
        unsafe { avr_device::interrupt::enable() };
    }

    /// Data-space address of SREG.
    const SREG: *const u8 = 0x5F as *const u8;

    #[inline(always)]
    pub fn is_enabled() -> bool {
        // SAFETY: SREG is always mapped and reading it has no side effects.
        let sreg = unsafe { core::ptr::read_volatile(SREG) };
        sreg & (1 << 7) != 0
    }
}

/// Model of the global interrupt enable bit for host builds.
#[cfg(all(not(feature = "board"), not(test)))]
mod backend {
    use core::sync::atomic::{AtomicBool, Ordering};

    static ENABLED: AtomicBool = AtomicBool::new(true);

    pub fn disable() {
        ENABLED.store(false, Ordering::SeqCst);
    }

    pub fn enable() {
        ENABLED.store(true, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        ENABLED.load(Ordering::SeqCst)
    }
}

// Per-thread so tests running in parallel each see their own bit.
#[cfg(all(not(feature = "board"), test))]
mod backend {
    use std::cell::Cell;

    std::thread_local! {
        static ENABLED: Cell<bool> = const { Cell::new(true) };
    }

    pub fn disable() {
        ENABLED.with(|e| e.set(false));
    }

    pub fn enable() {
        ENABLED.with(|e| e.set(true));
    }

    pub fn is_enabled() -> bool {
        ENABLED.with(|e| e.get())
    }
}
