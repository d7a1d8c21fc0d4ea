//! # Perch-32 Runtime
//!
//! CPU simulator for the Perch-32: a 16-register predicated machine
//! with a flat word-addressed memory. The CPU owns its registers and
//! condition flag, is bound to one [`Memory`], and publishes a step
//! event to registered listeners before each instruction takes effect.

pub mod alu;
pub mod cpu;
pub mod memory;
pub mod registers;

pub use cpu::{Cpu, CpuConfig, CpuStep, HaltReason};
pub use memory::Memory;
pub use registers::RegisterFile;
