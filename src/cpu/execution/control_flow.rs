use crate::bus;
use crate::context::Context;
use crate::cpu::registers::Registers;

use super::stack_operations::{pop16, push16};
use super::{Cond, Instruction};

fn cond_met(regs: &Registers, cond: Cond) -> bool {
    match cond {
        Cond::Always => true,
        Cond::Nz => !regs.f.zero,
        Cond::Z => regs.f.zero,
        Cond::Nc => !regs.f.carry,
        Cond::C => regs.f.carry,
    }
}

pub fn execute(ctx: &mut Context, instr: Instruction) {
    match instr {
        Instruction::Jr { cond, offset } => {
            if cond_met(&ctx.cpu.registers, cond) {
                ctx.cpu.pc = ctx.cpu.pc.wrapping_add(offset as i16 as u16);
                bus::step_internal(ctx);
            }
        }
        Instruction::Jp { cond, addr } => {
            if cond_met(&ctx.cpu.registers, cond) {
                ctx.cpu.pc = addr;
                bus::step_internal(ctx);
            }
        }
        Instruction::JpHl => {
            ctx.cpu.pc = ctx.cpu.registers.get_hl();
        }
        Instruction::Call { cond, addr } => {
            if cond_met(&ctx.cpu.registers, cond) {
                bus::step_internal(ctx);
                let return_pc = ctx.cpu.pc;
                push16(ctx, return_pc);
                ctx.cpu.pc = addr;
            }
        }
        Instruction::Ret { cond } => {
            if !matches!(cond, Cond::Always) {
                bus::step_internal(ctx);
            }
            if cond_met(&ctx.cpu.registers, cond) {
                let addr = pop16(ctx);
                ctx.cpu.pc = addr;
                bus::step_internal(ctx);
            }
        }
        Instruction::Reti => {
            let addr = pop16(ctx);
            ctx.cpu.pc = addr;
            bus::step_internal(ctx);
            ctx.cpu.ime = true;
        }
        Instruction::Rst { vector } => {
            bus::step_internal(ctx);
            let return_pc = ctx.cpu.pc;
            push16(ctx, return_pc);
            ctx.cpu.pc = vector as u16;
        }
        _ => unreachable!("control_flow::execute called with a non-control-flow instruction"),
    }
}
