use sparc_asm::op;
use sparc_vm::consts::*;
use sparc_vm::prelude::*;

use quickcheck_macros::quickcheck;

const DATA: Word = 0x8000;

/// Load a program at address zero and boot core 0 in front of it.
fn load(words: &[u32]) -> Interpreter<LinearMemory> {
    let mut vm = Interpreter::with_linear_memory(1 << 20);

    for (i, word) in words.iter().enumerate() {
        vm.memory_mut().write_word(4 * i as Word, *word).unwrap();
    }

    vm.init_core(0, 0);
    vm.reg_write(REG_O0, DATA);
    vm
}

fn step(vm: &mut Interpreter<LinearMemory>) {
    assert!(vm.step().unwrap().should_continue());
}

#[quickcheck]
fn word_store_load_round_trips(x: Word) -> bool {
    let mut vm = load(&[op::st_imm(REG_O1, REG_O0, 0), op::ld_imm(REG_O0, 0, REG_O2)]);
    vm.reg_write(REG_O1, x);
    step(&mut vm);
    step(&mut vm);

    vm.registers()[REG_O2] == x
}

#[quickcheck]
fn byte_store_load_keeps_the_low_byte(x: Word) -> bool {
    let mut vm = load(&[op::stb_imm(REG_O1, REG_O0, 0), op::ldub_imm(REG_O0, 0, REG_O2)]);
    vm.reg_write(REG_O1, x);
    step(&mut vm);
    step(&mut vm);

    vm.registers()[REG_O2] == (x & 0xff)
}

#[quickcheck]
fn half_store_signed_load_sign_extends(x: Word) -> bool {
    let mut vm = load(&[op::sth_imm(REG_O1, REG_O0, 0), op::ldsh_imm(REG_O0, 0, REG_O2)]);
    vm.reg_write(REG_O1, x);
    step(&mut vm);
    step(&mut vm);

    vm.registers()[REG_O2] == (x as u16 as i16 as i32 as Word)
}

#[test]
fn signed_byte_load_sign_extends() {
    let mut vm = load(&[op::ldsb_imm(REG_O0, 3, REG_O1), op::ldub_imm(REG_O0, 3, REG_O2)]);
    vm.memory_mut().write_word(DATA, 0x0000_0080).unwrap();
    step(&mut vm);
    step(&mut vm);

    assert_eq!(vm.registers()[REG_O1], 0xffff_ff80);
    assert_eq!(vm.registers()[REG_O2], 0x0000_0080);
}

#[test]
fn unsigned_half_load_zero_extends() {
    let mut vm = load(&[op::lduh_imm(REG_O0, 0, REG_O1), op::ldsh_imm(REG_O0, 0, REG_O2)]);
    vm.memory_mut().write_half(DATA, 0x8001).unwrap();
    step(&mut vm);
    step(&mut vm);

    assert_eq!(vm.registers()[REG_O1], 0x0000_8001);
    assert_eq!(vm.registers()[REG_O2], 0xffff_8001);
}

#[test]
fn register_form_uses_rs2_as_offset() {
    let mut vm = load(&[op::ld(REG_O0, REG_O1, REG_O2)]);
    vm.reg_write(REG_O1, 8);
    vm.memory_mut().write_word(DATA + 8, 0xdead_beef).unwrap();
    step(&mut vm);

    assert_eq!(vm.registers()[REG_O2], 0xdead_beef);
}

#[test]
fn negative_immediate_offsets_subtract() {
    let mut vm = load(&[op::ld_imm(REG_O0, -4, REG_O1)]);
    vm.memory_mut().write_word(DATA - 4, 0x55aa_55aa).unwrap();
    step(&mut vm);

    assert_eq!(vm.registers()[REG_O1], 0x55aa_55aa);
}

#[test]
fn ldd_loads_high_word_into_rd() {
    let mut vm = load(&[op::ldd_imm(REG_O0, 0, REG_O2)]);
    vm.memory_mut().write_word(DATA, 0x0123_4567).unwrap();
    vm.memory_mut().write_word(DATA + 4, 0x89ab_cdef).unwrap();
    step(&mut vm);

    assert_eq!(vm.registers()[REG_O2], 0x0123_4567);
    assert_eq!(vm.registers()[REG_O3], 0x89ab_cdef);
}

#[test]
fn std_stores_the_pair_in_order() {
    let mut vm = load(&[op::std_imm(REG_O2, REG_O0, 0)]);
    vm.reg_write(REG_O2, 0x1111_2222);
    vm.reg_write(REG_O3, 0x3333_4444);
    step(&mut vm);

    assert_eq!(vm.memory().read_word(DATA).unwrap(), 0x1111_2222);
    assert_eq!(vm.memory().read_word(DATA + 4).unwrap(), 0x3333_4444);
}

#[test]
fn ldstub_reads_then_marks_the_byte() {
    let mut vm = load(&[op::ldstub_imm(REG_O0, 0, REG_O1)]);
    vm.memory_mut().write_byte(DATA, 0x42).unwrap();
    step(&mut vm);

    assert_eq!(vm.registers()[REG_O1], 0x42);
    assert_eq!(vm.memory().read_byte(DATA).unwrap(), 0xff);
}

#[test]
fn swap_exchanges_register_and_memory() {
    let mut vm = load(&[op::swap_imm(REG_O0, 0, REG_O1)]);
    vm.reg_write(REG_O1, 0xaaaa_bbbb);
    vm.memory_mut().write_word(DATA, 0x1234_5678).unwrap();
    step(&mut vm);

    assert_eq!(vm.registers()[REG_O1], 0x1234_5678);
    assert_eq!(vm.memory().read_word(DATA).unwrap(), 0xaaaa_bbbb);
}

#[test]
fn loads_into_g0_are_discarded_but_access_memory() {
    let mut vm = load(&[op::ldstub_imm(REG_O0, 0, REG_G0)]);
    vm.memory_mut().write_byte(DATA, 0x42).unwrap();
    step(&mut vm);

    assert_eq!(vm.registers()[REG_G0], 0);
    // The store half of the atomic pair still happened.
    assert_eq!(vm.memory().read_byte(DATA).unwrap(), 0xff);
}

#[test]
fn misaligned_word_access_is_fatal() {
    let mut vm = load(&[op::ld_imm(REG_O0, 2, REG_O1)]);

    assert!(matches!(
        vm.step(),
        Err(VmError::Memory(MemoryError::Misaligned { .. }))
    ));
}

#[test]
fn misaligned_half_access_is_fatal() {
    let mut vm = load(&[op::sth_imm(REG_O1, REG_O0, 1)]);

    assert!(matches!(
        vm.step(),
        Err(VmError::Memory(MemoryError::Misaligned { .. }))
    ));
}

#[test]
fn out_of_bounds_access_is_fatal() {
    let mut vm = load(&[op::ld_imm(REG_O1, 0, REG_O2)]);
    vm.reg_write(REG_O1, vm.ram_end());

    assert!(matches!(
        vm.step(),
        Err(VmError::Memory(MemoryError::OutOfBounds { .. }))
    ));
}
