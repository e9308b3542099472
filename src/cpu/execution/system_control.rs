use crate::context::Context;

use super::Instruction;

pub fn execute(ctx: &mut Context, instr: Instruction) {
    match instr {
        Instruction::Nop => {}
        Instruction::Stop => {
            // Real hardware stops the system clock pending a button press;
            // this core has no display/input to wake it, so STOP behaves
            // as a no-op beyond the padding byte decode_base already read.
        }
        Instruction::Halt => {
            ctx.cpu.halted = true;
        }
        Instruction::Di => {
            ctx.cpu.ime = false;
            // DI cancels a pending EI even if the delayed enable hasn't
            // landed yet.
            ctx.cpu.ei_delay = 0;
        }
        Instruction::Ei => {
            // IME takes effect after the instruction following EI, not EI
            // itself, so arm a two-step countdown rather than setting it now.
            ctx.cpu.ei_delay = 2;
        }
        _ => unreachable!("system_control::execute called with a non-system-control instruction"),
    }
}
