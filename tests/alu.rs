use sparc_asm::op;
use sparc_vm::consts::*;
use sparc_vm::prelude::*;

use quickcheck_macros::quickcheck;

/// Load a program at address zero and boot core 0 in front of it.
fn load(words: &[u32]) -> Interpreter<LinearMemory> {
    let mut vm = Interpreter::with_linear_memory(1 << 20);

    for (i, word) in words.iter().enumerate() {
        vm.memory_mut().write_word(4 * i as Word, *word).unwrap();
    }

    vm.init_core(0, 0);
    vm
}

fn step(vm: &mut Interpreter<LinearMemory>) {
    assert!(vm.step().unwrap().should_continue());
}

#[quickcheck]
fn addcc_flags_match_the_reference_semantics(a: Word, b: Word) -> bool {
    let mut vm = load(&[op::addcc(REG_O0, REG_O1, REG_O2)]);
    vm.reg_write(REG_O0, a);
    vm.reg_write(REG_O1, b);
    step(&mut vm);

    let r = a.wrapping_add(b);
    let icc = vm.icc();

    vm.registers()[REG_O2] == r
        && icc.n == ((r as i32) < 0)
        && icc.z == (r == 0)
        && icc.v == (a as i32).checked_add(b as i32).is_none()
        && icc.c == (a as u64 + b as u64 > u64::from(u32::MAX))
}

#[quickcheck]
fn subcc_flags_match_the_reference_semantics(a: Word, b: Word) -> bool {
    let mut vm = load(&[op::subcc(REG_O0, REG_O1, REG_O2)]);
    vm.reg_write(REG_O0, a);
    vm.reg_write(REG_O1, b);
    step(&mut vm);

    let r = a.wrapping_sub(b);
    let icc = vm.icc();

    vm.registers()[REG_O2] == r
        && icc.n == ((r as i32) < 0)
        && icc.z == (r == 0)
        && icc.v == (a as i32).checked_sub(b as i32).is_none()
        && icc.c == (a < b)
}

#[quickcheck]
fn sra_is_floor_division_by_a_power_of_two(x: Word, k: u8) -> bool {
    let k = u32::from(k) % 32;
    let mut vm = load(&[op::sra_imm(REG_O0, k as i32, REG_O1)]);
    vm.reg_write(REG_O0, x);
    step(&mut vm);

    let expected = i64::from(x as i32).div_euclid(1 << k);
    vm.registers()[REG_O1] as i32 as i64 == expected
}

#[quickcheck]
fn logical_ops_clear_v_and_c(a: Word, b: Word) -> bool {
    let mut vm = load(&[op::addcc(REG_O0, REG_O0, REG_G0), op::xorcc(REG_O0, REG_O1, REG_O2)]);
    vm.reg_write(REG_O0, a);
    vm.reg_write(REG_O1, b);
    step(&mut vm);
    step(&mut vm);

    let r = a ^ b;
    let icc = vm.icc();

    vm.registers()[REG_O2] == r && icc.n == ((r as i32) < 0) && icc.z == (r == 0) && !icc.v && !icc.c
}

#[test]
fn sethi_shifts_the_immediate_into_the_high_bits() {
    let mut vm = load(&[op::sethi(0x12345, REG_O0)]);
    step(&mut vm);

    assert_eq!(vm.registers()[REG_O0], 0x48d1_4000);
    assert_eq!(vm.pc(), 4);
    assert_eq!(vm.npc(), 8);
}

#[test]
fn addcc_signals_signed_overflow() {
    let mut vm = load(&[op::addcc(REG_O0, REG_O1, REG_O2)]);
    vm.reg_write(REG_O0, 0x7fff_ffff);
    vm.reg_write(REG_O1, 1);
    step(&mut vm);

    assert_eq!(vm.registers()[REG_O2], 0x8000_0000);
    let icc = vm.icc();
    assert!(icc.n && !icc.z && icc.v && !icc.c);
}

#[test]
fn subcc_signals_borrow() {
    let mut vm = load(&[op::subcc(REG_O0, REG_O1, REG_O2)]);
    vm.reg_write(REG_O0, 0);
    vm.reg_write(REG_O1, 1);
    step(&mut vm);

    assert_eq!(vm.registers()[REG_O2], 0xffff_ffff);
    let icc = vm.icc();
    assert!(icc.n && !icc.z && !icc.v && icc.c);
}

#[test]
fn carry_chains_through_addx() {
    // 64-bit addition: (o0,o1) + (o2,o3) with the low words carrying.
    let mut vm = load(&[op::addcc(REG_O1, REG_O3, REG_O1), op::addx(REG_O0, REG_O2, REG_O0)]);
    vm.reg_write(REG_O0, 1); // high a
    vm.reg_write(REG_O1, 0xffff_ffff); // low a
    vm.reg_write(REG_O2, 2); // high b
    vm.reg_write(REG_O3, 1); // low b
    step(&mut vm);
    step(&mut vm);

    assert_eq!(vm.registers()[REG_O1], 0);
    assert_eq!(vm.registers()[REG_O0], 4);
}

#[test]
fn subx_consumes_the_borrow() {
    let mut vm = load(&[op::subcc(REG_O0, REG_O1, REG_G0), op::subx_imm(REG_O2, 0, REG_O2)]);
    vm.reg_write(REG_O0, 0);
    vm.reg_write(REG_O1, 1);
    vm.reg_write(REG_O2, 10);
    step(&mut vm);
    step(&mut vm);

    assert_eq!(vm.registers()[REG_O2], 9);
}

#[test]
fn umul_splits_the_product_across_y() {
    let mut vm = load(&[op::umul(REG_O0, REG_O1, REG_O2), op::rdy(REG_O3)]);
    vm.reg_write(REG_O0, 0xffff_ffff);
    vm.reg_write(REG_O1, 0xffff_ffff);
    step(&mut vm);
    step(&mut vm);

    // 0xFFFFFFFF² = 0xFFFFFFFE_00000001
    assert_eq!(vm.registers()[REG_O2], 0x0000_0001);
    assert_eq!(vm.registers()[REG_O3], 0xffff_fffe);
}

#[test]
fn smul_keeps_the_sign_in_the_high_half() {
    let mut vm = load(&[op::smul_imm(REG_O0, -2, REG_O1)]);
    vm.reg_write(REG_O0, 3);
    step(&mut vm);

    assert_eq!(vm.registers()[REG_O1] as i32, -6);
    assert_eq!(vm.y(), 0xffff_ffff);
}

#[test]
fn umulcc_sets_nz_from_the_low_half_only() {
    let mut vm = load(&[op::umulcc(REG_O0, REG_O1, REG_O2)]);
    vm.reg_write(REG_O0, 0x0001_0000);
    vm.reg_write(REG_O1, 0x0001_0000);
    step(&mut vm);

    // Product is 1 << 32: low half zero, high half one.
    assert_eq!(vm.registers()[REG_O2], 0);
    assert_eq!(vm.y(), 1);
    let icc = vm.icc();
    assert!(!icc.n && icc.z && !icc.v && !icc.c);
}

#[test]
fn udiv_consumes_the_y_dividend_and_saturates() {
    let mut vm = load(&[
        op::wry_imm(REG_G0, 0, REG_G0), // y = 0
        op::udiv_imm(REG_O0, 4, REG_O1),
        op::wry_imm(REG_O2, 0, REG_G0), // y = o2
        op::udivcc_imm(REG_O0, 2, REG_O3),
    ]);
    vm.reg_write(REG_O0, 100);
    vm.reg_write(REG_O2, 2); // dividend = 2 << 32 | 100
    for _ in 0..4 {
        step(&mut vm);
    }

    assert_eq!(vm.registers()[REG_O1], 25);
    // (2 << 32 | 100) / 2 does not fit in 32 bits: saturate and raise V.
    assert_eq!(vm.registers()[REG_O3], 0xffff_ffff);
    assert!(vm.icc().v);
}

#[test]
fn sdiv_saturates_towards_the_quotient_sign() {
    let mut vm = load(&[
        op::wry_imm(REG_O2, 0, REG_G0),
        op::sdivcc_imm(REG_O0, 2, REG_O1),
    ]);
    vm.reg_write(REG_O0, 0);
    vm.reg_write(REG_O2, 0x8000_0000); // dividend = i64::MIN
    step(&mut vm);
    step(&mut vm);

    assert_eq!(vm.registers()[REG_O1], 0x8000_0000);
    assert!(vm.icc().v);
    assert!(vm.icc().n);
}

#[test]
fn sdiv_in_range_does_not_saturate() {
    let mut vm = load(&[op::wry_imm(REG_G0, 0, REG_G0), op::sdiv_imm(REG_O0, -4, REG_O1)]);
    vm.reg_write(REG_O0, 100);
    step(&mut vm);
    step(&mut vm);

    assert_eq!(vm.registers()[REG_O1] as i32, -25);
}

#[test]
fn division_by_zero_is_fatal() {
    let mut vm = load(&[op::udiv_imm(REG_O0, 0, REG_O1)]);
    vm.reg_write(REG_O0, 1);

    assert!(matches!(
        vm.step(),
        Err(VmError::Trap {
            reason: TrapReason::DivisionByZero,
            pc: 0
        })
    ));
}

#[test]
fn wry_xors_rs1_with_the_operand() {
    let mut vm = load(&[op::wry_imm(REG_O0, 0xff, REG_G0), op::rdy(REG_O1)]);
    vm.reg_write(REG_O0, 0x0f0f);
    step(&mut vm);
    step(&mut vm);

    assert_eq!(vm.registers()[REG_O1], 0x0f0f ^ 0xff);
}

#[test]
fn mulscc_sequence_multiplies_through_y() {
    // The canonical 32-step multiply: multiplier in %y, multiplicand as
    // the mulscc operand, partial product accumulating in %o4.
    let mut program = vec![
        op::wry_imm(REG_O0, 0, REG_G0),          // %y = multiplier
        op::andcc(REG_G0, REG_G0, REG_O0 + 4),   // clear %o4, N and V
    ];
    program.extend(std::iter::repeat(op::mulscc(REG_O0 + 4, REG_O1, REG_O0 + 4)).take(32));
    program.push(op::mulscc(REG_O0 + 4, REG_G0, REG_O0 + 4));
    program.push(op::rdy(REG_O2));

    let mut vm = load(&program);
    vm.reg_write(REG_O0, 10_007); // multiplier
    vm.reg_write(REG_O1, 3_301); // multiplicand

    for _ in 0..program.len() {
        step(&mut vm);
    }

    assert_eq!(vm.registers()[REG_O2], 10_007 * 3_301);
    assert_eq!(vm.registers()[REG_O0 + 4], 0);
}

#[test]
fn writes_to_g0_are_discarded() {
    let mut vm = load(&[op::add_imm(REG_G0, 123, REG_G0), op::sethi(0x3ffff, REG_G0)]);
    step(&mut vm);
    step(&mut vm);

    assert_eq!(vm.registers()[REG_G0], 0);
    assert_eq!(vm.reg_read(REG_G0), 0);
}
