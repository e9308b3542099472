use crate::bus;
use crate::context::Context;
use crate::cpu::execution::arithmetic::add_sp_offset;

use super::{read_r8, write_r8, IndirectPattern, Instruction};

pub fn execute(ctx: &mut Context, instr: Instruction) {
    match instr {
        Instruction::LdR8R8 { dst, src } => {
            let value = read_r8(ctx, src);
            write_r8(ctx, dst, value);
        }
        Instruction::LdR8Imm8 { dst, imm } => write_r8(ctx, dst, imm),
        Instruction::LdR16Imm16 { r16, imm } => {
            let mut sp = ctx.cpu.sp;
            ctx.cpu.registers.set_r16(r16, imm, &mut sp);
            ctx.cpu.sp = sp;
        }
        Instruction::LdIndirectA { pattern, to_a } => {
            let addr = match pattern {
                IndirectPattern::Bc => ctx.cpu.registers.get_bc(),
                IndirectPattern::De => ctx.cpu.registers.get_de(),
                IndirectPattern::HlInc | IndirectPattern::HlDec => ctx.cpu.registers.get_hl(),
            };
            if to_a {
                ctx.cpu.registers.a = bus::read(ctx, addr);
            } else {
                let a = ctx.cpu.registers.a;
                bus::write(ctx, addr, a);
            }
            match pattern {
                IndirectPattern::HlInc => ctx.cpu.registers.set_hl(addr.wrapping_add(1)),
                IndirectPattern::HlDec => ctx.cpu.registers.set_hl(addr.wrapping_sub(1)),
                IndirectPattern::Bc | IndirectPattern::De => {}
            }
        }
        Instruction::LdhCA { to_a } => {
            let addr = 0xFF00 + ctx.cpu.registers.c as u16;
            if to_a {
                ctx.cpu.registers.a = bus::read(ctx, addr);
            } else {
                let a = ctx.cpu.registers.a;
                bus::write(ctx, addr, a);
            }
        }
        Instruction::LdhImm8A { imm, to_a } => {
            let addr = 0xFF00 + imm as u16;
            if to_a {
                ctx.cpu.registers.a = bus::read(ctx, addr);
            } else {
                let a = ctx.cpu.registers.a;
                bus::write(ctx, addr, a);
            }
        }
        Instruction::LdImm16A { addr, to_a } => {
            if to_a {
                ctx.cpu.registers.a = bus::read(ctx, addr);
            } else {
                let a = ctx.cpu.registers.a;
                bus::write(ctx, addr, a);
            }
        }
        Instruction::LdImm16Sp { addr } => {
            let sp = ctx.cpu.sp;
            bus::write(ctx, addr, sp as u8);
            bus::write(ctx, addr.wrapping_add(1), (sp >> 8) as u8);
        }
        Instruction::LdSpHl => {
            ctx.cpu.sp = ctx.cpu.registers.get_hl();
            bus::step_internal(ctx);
        }
        Instruction::LdHlSpOffset { offset } => {
            let result = add_sp_offset(ctx.cpu.sp, offset, &mut ctx.cpu.registers);
            ctx.cpu.registers.set_hl(result);
            bus::step_internal(ctx);
        }
        _ => unreachable!("data_transfer::execute called with a non-data-transfer instruction"),
    }
}
