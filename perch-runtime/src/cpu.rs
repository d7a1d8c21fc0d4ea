//! The Perch-32 CPU: fetch, decode, predicate check, execute.
//!
//! The CPU owns 16 registers (r0 hardwired to zero, r15 the program
//! counter), a condition flag register, a halted flag, and the memory
//! it is bound to. `step` never panics and never returns an error:
//! every anomaly degrades to a halt with a recorded [`HaltReason`].

use perch_spec::{decode, Address, CondFlag, Instruction, OpCode, Word};

use crate::alu;
use crate::memory::Memory;
use crate::registers::RegisterFile;

/// CPU configuration
#[derive(Debug, Clone)]
pub struct CpuConfig {
    /// Externally imposed step cap; the only stop besides HALT
    pub max_steps: u64,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            max_steps: 1_000_000,
        }
    }
}

/// Why the CPU stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HaltReason {
    /// A HALT instruction executed
    Halt,
    /// The opcode field held an unassigned code
    InvalidInstruction { addr: Address, word: Word },
    /// A fetch or memory effect fell outside 0..memory.len()
    MemoryFault { addr: Address },
    /// The configured step cap tripped
    StepLimit,
}

/// Published to listeners once per step, after decode and before any
/// state mutation. Listeners observe consistent pre-mutation state.
#[derive(Debug, Clone, Copy)]
pub struct CpuStep {
    /// Address the instruction was fetched from
    pub addr: Address,
    /// Raw instruction word
    pub word: Word,
    /// Decoded instruction
    pub instr: Instruction,
}

type StepListener = Box<dyn FnMut(&CpuStep)>;

/// The central processing unit, bound to one memory for its lifetime.
pub struct Cpu {
    memory: Memory,
    registers: RegisterFile,
    condition: CondFlag,
    halted: bool,
    halt_reason: Option<HaltReason>,
    config: CpuConfig,
    listeners: Vec<StepListener>,
}

impl Cpu {
    pub fn new(memory: Memory) -> Self {
        Self::with_config(memory, CpuConfig::default())
    }

    pub fn with_config(memory: Memory, config: CpuConfig) -> Self {
        Self {
            memory,
            registers: RegisterFile::new(),
            condition: CondFlag::ALWAYS,
            halted: false,
            halt_reason: None,
            config,
            listeners: Vec::new(),
        }
    }

    /// Register a step listener. Any number may be registered; each is
    /// called synchronously, in registration order, once per step.
    pub fn on_step(&mut self, listener: impl FnMut(&CpuStep) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn condition(&self) -> CondFlag {
        self.condition
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn halt_reason(&self) -> Option<&HaltReason> {
        self.halt_reason.as_ref()
    }

    fn halt(&mut self, reason: HaltReason) {
        self.halted = true;
        self.halt_reason = Some(reason);
    }

    /// One fetch/decode/execute step.
    pub fn step(&mut self) {
        // FETCH
        let addr = self.registers.pc();
        let word = match self.memory.get(addr) {
            Some(word) => word,
            None => {
                self.halt(HaltReason::MemoryFault { addr });
                return;
            }
        };

        // DECODE
        let instr = match decode(word) {
            Ok(instr) => instr,
            Err(_) => {
                self.halt(HaltReason::InvalidInstruction { addr, word });
                return;
            }
        };

        // Publish the step before any mutation so listeners see the
        // machine exactly as the instruction will find it
        let event = CpuStep { addr, word, instr };
        for listener in &mut self.listeners {
            listener(&event);
        }
        tracing::debug!(addr, word, %instr, "step");

        // PREDICATE: execute iff condition AND mask is nonempty
        if (self.condition & instr.cond).is_empty() {
            self.registers.set_pc(addr.wrapping_add(1));
            return;
        }

        // OPERANDS and ALU
        let op1 = self.registers.get(instr.src1) as i32;
        let op2 = instr
            .offset
            .wrapping_add(self.registers.get(instr.src2) as i32);
        let (result, flag) = alu::exec(instr.op, op1, op2);

        // pc advances before the opcode effect, so an effect that
        // touches pc (a jump lowered to ADD r15,...) observes the
        // already-advanced value
        self.registers.set_pc(addr.wrapping_add(1));

        match instr.op {
            OpCode::Store => {
                let target_addr = result as Address;
                let value = self.registers.get(instr.target);
                if !self.memory.put(target_addr, value) {
                    self.halt(HaltReason::MemoryFault { addr: target_addr });
                }
            }
            OpCode::Load => {
                let target_addr = result as Address;
                match self.memory.get(target_addr) {
                    Some(value) => self.registers.put(instr.target, value),
                    None => self.halt(HaltReason::MemoryFault { addr: target_addr }),
                }
            }
            OpCode::Halt => {
                self.halt(HaltReason::Halt);
            }
            OpCode::Add | OpCode::Sub | OpCode::Mul | OpCode::Div => {
                self.registers.put(instr.target, result as Word);
                self.condition = flag;
            }
        }
    }

    /// Run from `from_addr` until a HALT executes or the step cap
    /// trips. Resets pc and the halted flag; registers and the
    /// condition flag persist from any previous run.
    pub fn run(&mut self, from_addr: Address) -> HaltReason {
        self.halted = false;
        self.halt_reason = None;
        self.registers.set_pc(from_addr);

        let mut steps = 0u64;
        while !self.halted {
            if steps >= self.config.max_steps {
                self.halt(HaltReason::StepLimit);
                break;
            }
            self.step();
            steps += 1;
        }
        self.halt_reason.clone().unwrap_or(HaltReason::Halt)
    }
}
