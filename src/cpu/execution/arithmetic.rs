use crate::bus;
use crate::context::Context;
use crate::cpu::registers::Registers;

use super::{read_r8, write_r8, AluOp, Instruction};

pub fn execute(ctx: &mut Context, instr: Instruction) {
    match instr {
        Instruction::AluR8 { op, src } => {
            let value = read_r8(ctx, src);
            apply_alu(ctx, op, value);
        }
        Instruction::AluImm8 { op, imm } => apply_alu(ctx, op, imm),
        Instruction::IncR8 { r } => {
            let value = read_r8(ctx, r);
            let result = inc8(&mut ctx.cpu.registers, value);
            write_r8(ctx, r, result);
        }
        Instruction::DecR8 { r } => {
            let value = read_r8(ctx, r);
            let result = dec8(&mut ctx.cpu.registers, value);
            write_r8(ctx, r, result);
        }
        Instruction::IncR16 { r16 } => {
            let value = ctx.cpu.registers.get_r16(r16, ctx.cpu.sp);
            let mut sp = ctx.cpu.sp;
            ctx.cpu.registers.set_r16(r16, value.wrapping_add(1), &mut sp);
            ctx.cpu.sp = sp;
            bus::step_internal(ctx);
        }
        Instruction::DecR16 { r16 } => {
            let value = ctx.cpu.registers.get_r16(r16, ctx.cpu.sp);
            let mut sp = ctx.cpu.sp;
            ctx.cpu.registers.set_r16(r16, value.wrapping_sub(1), &mut sp);
            ctx.cpu.sp = sp;
            bus::step_internal(ctx);
        }
        Instruction::AddHlR16 { r16 } => {
            let value = ctx.cpu.registers.get_r16(r16, ctx.cpu.sp);
            add_hl(&mut ctx.cpu.registers, value);
            bus::step_internal(ctx);
        }
        Instruction::AddSpOffset { offset } => {
            let result = add_sp_offset(ctx.cpu.sp, offset, &mut ctx.cpu.registers);
            ctx.cpu.sp = result;
            bus::step_internal(ctx);
            bus::step_internal(ctx);
        }
        Instruction::Daa => daa(&mut ctx.cpu.registers),
        _ => unreachable!("arithmetic::execute called with a non-arithmetic instruction"),
    }
}

fn apply_alu(ctx: &mut Context, op: AluOp, value: u8) {
    match op {
        AluOp::Add => add(&mut ctx.cpu.registers, value),
        AluOp::Adc => adc(&mut ctx.cpu.registers, value),
        AluOp::Sub => sub(&mut ctx.cpu.registers, value),
        AluOp::Sbc => sbc(&mut ctx.cpu.registers, value),
        _ => unreachable!("logic ops are routed to logic::execute"),
    }
}

pub fn add(regs: &mut Registers, value: u8) {
    let a = regs.a;
    let (result, carry) = a.overflowing_add(value);
    regs.f.zero = result == 0;
    regs.f.subtract = false;
    regs.f.half_carry = (a & 0xF) + (value & 0xF) > 0xF;
    regs.f.carry = carry;
    regs.a = result;
}

pub fn adc(regs: &mut Registers, value: u8) {
    let a = regs.a;
    let cin = regs.f.carry as u8;
    let result = a.wrapping_add(value).wrapping_add(cin);
    regs.f.zero = result == 0;
    regs.f.subtract = false;
    regs.f.half_carry = (a & 0xF) + (value & 0xF) + cin > 0xF;
    regs.f.carry = a as u16 + value as u16 + cin as u16 > 0xFF;
    regs.a = result;
}

pub fn sub(regs: &mut Registers, value: u8) {
    let a = regs.a;
    let (result, carry) = a.overflowing_sub(value);
    regs.f.zero = result == 0;
    regs.f.subtract = true;
    regs.f.half_carry = (a & 0xF) < (value & 0xF);
    regs.f.carry = carry;
    regs.a = result;
}

pub fn sbc(regs: &mut Registers, value: u8) {
    let a = regs.a;
    let cin = regs.f.carry as u8;
    let result = a.wrapping_sub(value).wrapping_sub(cin);
    regs.f.zero = result == 0;
    regs.f.subtract = true;
    regs.f.half_carry = (a & 0xF) < (value & 0xF) + cin;
    regs.f.carry = (a as i16) - (value as i16) - (cin as i16) < 0;
    regs.a = result;
}

pub fn inc8(regs: &mut Registers, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    regs.f.zero = result == 0;
    regs.f.subtract = false;
    regs.f.half_carry = value & 0xF == 0xF;
    result
}

pub fn dec8(regs: &mut Registers, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    regs.f.zero = result == 0;
    regs.f.subtract = true;
    regs.f.half_carry = value & 0xF == 0;
    result
}

pub fn add_hl(regs: &mut Registers, value: u16) {
    let hl = regs.get_hl();
    let (result, carry) = hl.overflowing_add(value);
    regs.f.subtract = false;
    regs.f.half_carry = (hl & 0xFFF) + (value & 0xFFF) > 0xFFF;
    regs.f.carry = carry;
    regs.set_hl(result);
}

/// Shared by ADD SP,s8 and LD HL,SP+s8 — same flag formula, different
/// destination register.
pub fn add_sp_offset(sp: u16, offset: i8, regs: &mut Registers) -> u16 {
    let offset_u16 = offset as i16 as u16;
    let result = sp.wrapping_add(offset_u16);
    regs.f.zero = false;
    regs.f.subtract = false;
    regs.f.half_carry = (sp & 0xF) + (offset_u16 & 0xF) > 0xF;
    regs.f.carry = (sp & 0xFF) + (offset_u16 & 0xFF) > 0xFF;
    result
}

pub fn daa(regs: &mut Registers) {
    let mut a = regs.a;
    let mut correction: u8 = 0;
    let mut carry = regs.f.carry;

    if regs.f.half_carry || (!regs.f.subtract && (a & 0xF) > 0x9) {
        correction |= 0x06;
    }
    if carry || (!regs.f.subtract && a > 0x99) {
        correction |= 0x60;
        carry = true;
    }

    a = if regs.f.subtract {
        a.wrapping_sub(correction)
    } else {
        a.wrapping_add(correction)
    };

    regs.f.zero = a == 0;
    regs.f.half_carry = false;
    regs.f.carry = carry;
    regs.a = a;
}
