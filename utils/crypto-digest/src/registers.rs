//! Working registers whose roles rotate with the step number.
//!
//! The compression functions shift their working variables by one position
//! every step (`e = d, d = c, ...`). Instead of moving the values, the
//! register file keeps them in place and moves the names: role `r` at step
//! `s` lives in slot `(r - s) mod N`. After a multiple of `N` steps the
//! roles are back in their home slots.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Role of a working register within the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Registers<const N: usize> {
    slots: [u32; N],
    step: usize,
}

impl<const N: usize> Registers<N> {
    /// Load the registers from the first `N` state words.
    pub fn load(words: &[u32]) -> Registers<N> {
        let mut slots = [0u32; N];
        slots.copy_from_slice(&words[..N]);
        Registers { slots, step: 0 }
    }

    /// Steps taken since `load`.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Slot currently holding `role`.
    #[inline]
    pub fn slot(&self, role: Role) -> usize {
        debug_assert!((role as usize) < N);
        (role as usize + N - self.step % N) % N
    }

    #[inline]
    pub fn get(&self, role: Role) -> u32 {
        self.slots[self.slot(role)]
    }

    #[inline]
    pub fn set(&mut self, role: Role, val: u32) {
        let slot = self.slot(role);
        self.slots[slot] = val;
    }

    /// Wrapping add `val` into `role`.
    #[inline]
    pub fn add(&mut self, role: Role, val: u32) {
        let slot = self.slot(role);
        self.slots[slot] = self.slots[slot].wrapping_add(val);
    }

    /// Rotate `role` left by `bits`.
    #[inline]
    pub fn rotate_left(&mut self, role: Role, bits: u32) {
        let slot = self.slot(role);
        self.slots[slot] = self.slots[slot].rotate_left(bits);
    }

    /// Move every role one slot on.
    #[inline]
    pub fn advance(&mut self) {
        self.step += 1;
    }

    #[inline] pub fn a(&self) -> u32 { self.get(Role::A) }
    #[inline] pub fn b(&self) -> u32 { self.get(Role::B) }
    #[inline] pub fn c(&self) -> u32 { self.get(Role::C) }
    #[inline] pub fn d(&self) -> u32 { self.get(Role::D) }
    #[inline] pub fn e(&self) -> u32 { self.get(Role::E) }
    #[inline] pub fn f(&self) -> u32 { self.get(Role::F) }
    #[inline] pub fn g(&self) -> u32 { self.get(Role::G) }
    #[inline] pub fn h(&self) -> u32 { self.get(Role::H) }

    /// Value in home slot `i`. Only meaningful once the step count is a
    /// multiple of `N`.
    pub fn home(&self, i: usize) -> u32 {
        debug_assert_eq!(self.step % N, 0);
        self.slots[i]
    }

    /// Add the registers into `words`, slot by slot.
    pub fn fold_into(&self, words: &mut [u32]) {
        debug_assert_eq!(self.step % N, 0);
        for (word, &reg) in words.iter_mut().zip(self.slots.iter()) {
            *word = word.wrapping_add(reg);
        }
    }
}
