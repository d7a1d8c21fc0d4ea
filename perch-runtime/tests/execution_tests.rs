//! Execution tests driving the CPU with assembled programs
//!
//! These cover the interplay the unit tests cannot: label lowering
//! feeding pc-relative arithmetic, predicated control flow, and memory
//! traffic through LOAD/STORE.

use perch_assembler::assemble;
use perch_runtime::{Cpu, CpuConfig, HaltReason, Memory};
use perch_spec::{Program, Reg};

fn run_source(source: &str) -> Cpu {
    let program = assemble(source).expect("assembly failed");
    let mut memory = Memory::default();
    memory.load(&program);
    let mut cpu = Cpu::new(memory);
    let reason = cpu.run(0);
    assert_eq!(reason, HaltReason::Halt, "program did not halt cleanly");
    cpu
}

fn reg(n: u8) -> Reg {
    Reg::new(n).unwrap()
}

#[test]
fn test_sum_loop() {
    // Sum 5 + 4 + 3 + 2 + 1 into r2, store the result
    let source = "\
        ADD   r1,r0,r0[5]
        ADD   r2,r0,r0[0]
loop:   ADD   r2,r2,r1
        SUB   r1,r1,r0[1]
        JUMP/P loop
        STORE r2,result
        HALT  r0,r0,r0
result: DATA 0
";
    let cpu = run_source(source);
    assert_eq!(cpu.registers().get(reg(2)), 15);
    assert_eq!(cpu.memory().get(7), Some(15));
}

#[test]
fn test_predicated_absolute_value() {
    let source = "\
        LOAD  r1,val
        SUB   r0,r1,r0      # flags from r1, result discarded
        SUB/M r1,r0,r1      # negate only when negative
        STORE r1,val
        HALT  r0,r0,r0
val:    DATA -9
";
    let cpu = run_source(source);
    assert_eq!(cpu.registers().get(reg(1)), 9);
    assert_eq!(cpu.memory().get(5), Some(9));
}

#[test]
fn test_division_fault_sets_overflow_flag() {
    let source = "\
        ADD   r1,r0,r0[10]
        DIV   r2,r1,r0
        ADD/V r3,r0,r0[1]
        HALT  r0,r0,r0
";
    let cpu = run_source(source);
    assert_eq!(cpu.registers().get(reg(2)), 0);
    assert_eq!(cpu.registers().get(reg(3)), 1);
}

#[test]
fn test_infinite_loop_hits_step_cap() {
    let program = assemble("spin: JUMP spin\nHALT r0,r0,r0\n").unwrap();
    let mut memory = Memory::default();
    memory.load(&program);
    let mut cpu = Cpu::with_config(memory, CpuConfig { max_steps: 50 });
    assert_eq!(cpu.run(0), HaltReason::StepLimit);
}

#[test]
fn test_object_text_round_trip_executes() {
    let program = assemble(
        "\
        ADD   r1,r0,r0[7]
        STORE r1,out
        HALT  r0,r0,r0
out:    DATA 0
",
    )
    .unwrap();

    // Ship through the textual object format and run the reloaded copy
    let reloaded = Program::from_object_text(&program.to_object_text()).unwrap();
    assert_eq!(reloaded, program);

    let mut memory = Memory::default();
    memory.load(&reloaded);
    let mut cpu = Cpu::new(memory);
    assert_eq!(cpu.run(0), HaltReason::Halt);
    assert_eq!(cpu.memory().get(3), Some(7));
}
