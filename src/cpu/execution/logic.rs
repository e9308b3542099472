use crate::context::Context;
use crate::cpu::registers::Registers;

use super::{read_r8, AluOp, Instruction};

pub fn execute(ctx: &mut Context, instr: Instruction) {
    match instr {
        Instruction::AluR8 { op, src } => {
            let value = read_r8(ctx, src);
            apply(ctx, op, value);
        }
        Instruction::AluImm8 { op, imm } => apply(ctx, op, imm),
        Instruction::Cpl => {
            let regs = &mut ctx.cpu.registers;
            regs.a = !regs.a;
            regs.f.subtract = true;
            regs.f.half_carry = true;
        }
        Instruction::Scf => {
            let regs = &mut ctx.cpu.registers;
            regs.f.subtract = false;
            regs.f.half_carry = false;
            regs.f.carry = true;
        }
        Instruction::Ccf => {
            let regs = &mut ctx.cpu.registers;
            regs.f.subtract = false;
            regs.f.half_carry = false;
            regs.f.carry = !regs.f.carry;
        }
        _ => unreachable!("logic::execute called with a non-logic instruction"),
    }
}

fn apply(ctx: &mut Context, op: AluOp, value: u8) {
    match op {
        AluOp::And => and(&mut ctx.cpu.registers, value),
        AluOp::Xor => xor(&mut ctx.cpu.registers, value),
        AluOp::Or => or(&mut ctx.cpu.registers, value),
        AluOp::Cp => cp(&mut ctx.cpu.registers, value),
        _ => unreachable!("arithmetic ops are routed to arithmetic::execute"),
    }
}

fn and(regs: &mut Registers, value: u8) {
    regs.a &= value;
    regs.f.zero = regs.a == 0;
    regs.f.subtract = false;
    regs.f.half_carry = true;
    regs.f.carry = false;
}

fn xor(regs: &mut Registers, value: u8) {
    regs.a ^= value;
    regs.f.zero = regs.a == 0;
    regs.f.subtract = false;
    regs.f.half_carry = false;
    regs.f.carry = false;
}

fn or(regs: &mut Registers, value: u8) {
    regs.a |= value;
    regs.f.zero = regs.a == 0;
    regs.f.subtract = false;
    regs.f.half_carry = false;
    regs.f.carry = false;
}

fn cp(regs: &mut Registers, value: u8) {
    let a = regs.a;
    regs.f.zero = a == value;
    regs.f.subtract = true;
    regs.f.half_carry = (a & 0xF) < (value & 0xF);
    regs.f.carry = a < value;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_a_a_clears_a_and_sets_zero() {
        let mut r = Registers::new();
        r.a = 0x42;
        xor(&mut r, 0x42);
        assert_eq!(r.a, 0);
        assert!(r.f.zero);
    }

    #[test]
    fn cp_equal_values_sets_zero_without_changing_a() {
        let mut r = Registers::new();
        r.a = 0x10;
        cp(&mut r, 0x10);
        assert_eq!(r.a, 0x10);
        assert!(r.f.zero);
        assert!(r.f.subtract);
    }

    #[test]
    fn and_always_sets_half_carry() {
        let mut r = Registers::new();
        r.a = 0xFF;
        and(&mut r, 0x00);
        assert!(r.f.half_carry);
        assert!(!r.f.carry);
    }
}
