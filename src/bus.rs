//! Address decode and per-access timing. Every CPU-initiated access goes
//! through `read`/`write`, which step the scheduler by one M-cycle; `peek`
//! is the one exception, used only by the disassembler.

use crate::context::Context;
use crate::interrupts::Interrupt;
use crate::logger::{Channel, LogLevel};

const WRAM_START: u16 = 0xC000;
const WRAM_END: u16 = 0xDFFF;
const ECHO_START: u16 = 0xE000;
const ECHO_END: u16 = 0xFDFF;
const HRAM_START: u16 = 0xFF80;
const HRAM_END: u16 = 0xFFFE;

fn dispatch_fired(ctx: &mut Context, fired: Vec<crate::scheduler::TimerEvent>) {
    for event in fired {
        if ctx.timer.handle_event(event, &mut ctx.scheduler) {
            ctx.iflag |= 1 << Interrupt::Timer.bit();
        }
    }
}

fn decode_read(ctx: &mut Context, addr: u16) -> u8 {
    match addr {
        0x0000..=0x7FFF => ctx
            .cart
            .as_ref()
            .map(|c| c.read(addr))
            .unwrap_or(0xFF),
        WRAM_START..=WRAM_END => ctx.wram[(addr - WRAM_START) as usize],
        ECHO_START..=ECHO_END => ctx.wram[(addr - ECHO_START) as usize],
        0xA000..=0xBFFF => ctx
            .cart
            .as_ref()
            .map(|c| c.read(addr))
            .unwrap_or(0xFF),
        0x8000..=0x9FFF | 0xFE00..=0xFE9F => 0xFF,
        0xFF01 => 0, // serial data register reads back as 0, writes are the observable side
        0xFF04 => ctx.timer.read_div(&ctx.scheduler),
        0xFF05 => ctx.timer.read_tima(),
        0xFF06 => ctx.timer.read_tma(),
        0xFF07 => ctx.timer.read_tac(),
        0xFF0F => ctx.iflag | 0xE0,
        0xFF44 => 0xFF,
        HRAM_START..=HRAM_END => ctx.hram[(addr - HRAM_START) as usize],
        0xFFFF => ctx.ie,
        _ => {
            ctx.logger.log(
                LogLevel::Warn,
                Channel::Bus,
                &format!("read from unmapped address 0x{:04X}", addr),
            );
            0xFF
        }
    }
}

fn decode_write(ctx: &mut Context, addr: u16, value: u8) {
    match addr {
        0x0000..=0x7FFF => {
            if let Some(cart) = ctx.cart.as_mut() {
                cart.write(addr, value);
            }
        }
        WRAM_START..=WRAM_END => ctx.wram[(addr - WRAM_START) as usize] = value,
        ECHO_START..=ECHO_END => ctx.wram[(addr - ECHO_START) as usize] = value,
        0xA000..=0xBFFF => {
            if let Some(cart) = ctx.cart.as_mut() {
                cart.write(addr, value);
            }
        }
        0x8000..=0x9FFF | 0xFE00..=0xFE9F => {}
        0xFF01 => {
            ctx.serial_buffer.push(value as char);
            if value == b'\n' {
                let line = ctx.serial_buffer.clone();
                ctx.logger.log(LogLevel::Trace, Channel::Bus, line.trim_end_matches('\n'));
                ctx.serial_buffer.clear();
            }
        }
        0xFF04 => ctx.timer.write_div(&mut ctx.scheduler),
        0xFF05 => ctx.timer.write_tima(value, &mut ctx.scheduler),
        0xFF06 => ctx.timer.write_tma(value),
        0xFF07 => ctx.timer.write_tac(value, &mut ctx.scheduler),
        0xFF0F => ctx.iflag = value & 0x1F,
        HRAM_START..=HRAM_END => ctx.hram[(addr - HRAM_START) as usize] = value,
        0xFFFF => ctx.ie = value,
        _ => {
            ctx.logger.log(
                LogLevel::Warn,
                Channel::Bus,
                &format!("write to unmapped address 0x{:04X} (value 0x{:02X})", addr, value),
            );
        }
    }
}

pub fn read(ctx: &mut Context, addr: u16) -> u8 {
    let fired = ctx.scheduler.step();
    dispatch_fired(ctx, fired);
    decode_read(ctx, addr)
}

pub fn write(ctx: &mut Context, addr: u16, value: u8) {
    decode_write(ctx, addr, value);
    let fired = ctx.scheduler.step();
    dispatch_fired(ctx, fired);
}

/// Advances the scheduler by one M-cycle without any memory payload, for
/// the idle cycles interrupt dispatch spends between the push and the jump.
pub fn step_internal(ctx: &mut Context) {
    let fired = ctx.scheduler.step();
    dispatch_fired(ctx, fired);
}

/// Non-intrusive read: no scheduler advance, no logging. Used by the
/// disassembler only.
pub fn peek(ctx: &Context, addr: u16) -> u8 {
    match addr {
        0x0000..=0x7FFF | 0xA000..=0xBFFF => ctx.cart.as_ref().map(|c| c.read(addr)).unwrap_or(0xFF),
        WRAM_START..=WRAM_END => ctx.wram[(addr - WRAM_START) as usize],
        ECHO_START..=ECHO_END => ctx.wram[(addr - ECHO_START) as usize],
        0xFF04 => ctx.timer.read_div(&ctx.scheduler),
        0xFF05 => ctx.timer.read_tima(),
        0xFF06 => ctx.timer.read_tma(),
        0xFF07 => ctx.timer.read_tac(),
        0xFF0F => ctx.iflag | 0xE0,
        HRAM_START..=HRAM_END => ctx.hram[(addr - HRAM_START) as usize],
        0xFFFF => ctx.ie,
        _ => 0xFF,
    }
}
