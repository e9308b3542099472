use crate::context::Context;
use crate::cpu::registers::Registers;

use super::{read_r8, write_r8, Instruction, RotOp};

pub fn execute(ctx: &mut Context, instr: Instruction) {
    match instr {
        Instruction::RotateA { op } => {
            let regs = &mut ctx.cpu.registers;
            regs.a = rotate(regs, op, regs.a);
            // RLCA/RRCA/RLA/RRA always clear zero, unlike their CB-prefixed
            // counterparts which set it from the result.
            regs.f.zero = false;
        }
        Instruction::Rot { op, r } => {
            let value = read_r8(ctx, r);
            let result = rotate(&mut ctx.cpu.registers, op, value);
            ctx.cpu.registers.f.zero = result == 0;
            write_r8(ctx, r, result);
        }
        Instruction::Bit { bit, r } => {
            let value = read_r8(ctx, r);
            let regs = &mut ctx.cpu.registers;
            regs.f.zero = value & (1 << bit) == 0;
            regs.f.subtract = false;
            regs.f.half_carry = true;
        }
        Instruction::Res { bit, r } => {
            let value = read_r8(ctx, r);
            write_r8(ctx, r, value & !(1 << bit));
        }
        Instruction::Set { bit, r } => {
            let value = read_r8(ctx, r);
            write_r8(ctx, r, value | (1 << bit));
        }
        _ => unreachable!("bit_operations::execute called with a non-bit instruction"),
    }
}

fn rotate(regs: &mut Registers, op: RotOp, value: u8) -> u8 {
    let carry_in = regs.f.carry as u8;
    let (result, carry_out) = match op {
        RotOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
        RotOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
        RotOp::Rl => ((value << 1) | carry_in, value & 0x80 != 0),
        RotOp::Rr => ((value >> 1) | (carry_in << 7), value & 0x01 != 0),
        RotOp::Sla => (value << 1, value & 0x80 != 0),
        RotOp::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
        RotOp::Swap => (value.rotate_left(4), false),
        RotOp::Srl => (value >> 1, value & 0x01 != 0),
    };
    regs.f.subtract = false;
    regs.f.half_carry = false;
    regs.f.carry = if op == RotOp::Swap { false } else { carry_out };
    result
}
