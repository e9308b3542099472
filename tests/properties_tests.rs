mod common;

use common::context_with_code;
use rgb::context::Context;
use rgb::cpu;

#[test]
fn reset_produces_exact_post_boot_register_values() {
    let mut ctx = context_with_code(&[0x00]);
    ctx.cpu.pc = 0x9999;
    ctx.cpu.sp = 0x1234;
    ctx.cpu.registers.set_af(0x0000);
    ctx.reset();

    assert_eq!(ctx.cpu.registers.get_af(), 0x01B0);
    assert_eq!(ctx.cpu.registers.get_bc(), 0x0013);
    assert_eq!(ctx.cpu.registers.get_de(), 0x00D8);
    assert_eq!(ctx.cpu.registers.get_hl(), 0x014D);
    assert_eq!(ctx.cpu.pc, 0x0100);
    assert_eq!(ctx.cpu.sp, 0xFFFE);
}

#[test]
fn f_low_nibble_is_always_zero_after_set_af() {
    let mut ctx = Context::new();
    ctx.cpu.registers.set_af(0xFFFF);
    assert_eq!(ctx.cpu.registers.get_af() & 0x000F, 0);
}

#[test]
fn push_then_pop_leaves_sp_and_pair_unchanged() {
    let mut ctx = context_with_code(&[0xE5, 0xE1]); // PUSH HL ; POP HL
    ctx.cpu.registers.set_hl(0xC0DE);
    let sp_before = ctx.cpu.sp;
    cpu::step(&mut ctx);
    cpu::step(&mut ctx);
    assert_eq!(ctx.cpu.registers.get_hl(), 0xC0DE);
    assert_eq!(ctx.cpu.sp, sp_before);
}

#[test]
fn pop_af_clears_the_low_nibble_of_f() {
    let mut ctx = context_with_code(&[0xF5, 0xF1]); // PUSH AF ; POP AF
    ctx.cpu.registers.set_af(0xAB0F); // low nibble should never survive a push/pop
    cpu::step(&mut ctx);
    cpu::step(&mut ctx);
    assert_eq!(ctx.cpu.registers.get_af() & 0x000F, 0);
}

#[test]
fn xor_a_a_twice_leaves_a_zero_with_zero_flag_set() {
    let mut ctx = context_with_code(&[0xAF, 0xAF]); // XOR A,A ; XOR A,A
    ctx.cpu.registers.a = 0x42;
    cpu::step(&mut ctx);
    cpu::step(&mut ctx);
    assert_eq!(ctx.cpu.registers.a, 0);
    assert!(ctx.cpu.registers.f.zero);
}

#[test]
fn cpl_twice_restores_a_with_subtract_and_half_carry_set() {
    let mut ctx = context_with_code(&[0x2F, 0x2F]); // CPL ; CPL
    ctx.cpu.registers.a = 0x5A;
    cpu::step(&mut ctx);
    cpu::step(&mut ctx);
    assert_eq!(ctx.cpu.registers.a, 0x5A);
    assert!(ctx.cpu.registers.f.subtract);
    assert!(ctx.cpu.registers.f.half_carry);
}

#[test]
fn swap_zero_sets_zero_flag_and_swap_nibbles_otherwise() {
    let mut ctx = context_with_code(&[
        0xCB, 0x37, // SWAP A (A=0x00)
    ]);
    ctx.cpu.registers.a = 0x00;
    cpu::step(&mut ctx);
    assert_eq!(ctx.cpu.registers.a, 0x00);
    assert!(ctx.cpu.registers.f.zero);
}

#[test]
fn swap_f0_produces_0f() {
    let mut ctx = context_with_code(&[0xCB, 0x37]); // SWAP A
    ctx.cpu.registers.a = 0xF0;
    cpu::step(&mut ctx);
    assert_eq!(ctx.cpu.registers.a, 0x0F);
    assert!(!ctx.cpu.registers.f.zero);
}

#[test]
fn bit_7_on_0x80_is_set_and_on_zero_is_clear() {
    let mut ctx = context_with_code(&[0x3E, 0x80, 0xCB, 0x7F]); // LD A,0x80 ; BIT 7,A
    cpu::step(&mut ctx);
    cpu::step(&mut ctx);
    assert!(!ctx.cpu.registers.f.zero);
    assert!(!ctx.cpu.registers.f.subtract);
    assert!(ctx.cpu.registers.f.half_carry);

    let mut ctx2 = context_with_code(&[0x3E, 0x00, 0xCB, 0x7F]); // LD A,0x00 ; BIT 7,A
    cpu::step(&mut ctx2);
    cpu::step(&mut ctx2);
    assert!(ctx2.cpu.registers.f.zero);
}

#[test]
fn each_access_advances_the_scheduler_by_exactly_four_ticks() {
    let mut ctx = context_with_code(&[0x00]);
    let before = ctx.scheduler.curr_ts;
    cpu::step(&mut ctx);
    assert_eq!(ctx.scheduler.curr_ts, before + 4);
}
