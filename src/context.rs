use crate::cart::{Cartridge, LoadError};
use crate::cpu::Cpu;
use crate::logger::Logger;
use crate::scheduler::Scheduler;
use crate::timer::Timer;

/// Owns every piece of mutable emulator state. Every core operation takes
/// `&mut Context` (or `&Context` for read-only inspection) instead of
/// threading raw back-references between components.
pub struct Context {
    pub cart: Option<Cartridge>,
    pub wram: [u8; 0x2000],
    pub hram: [u8; 0x7F],
    pub scheduler: Scheduler,
    pub timer: Timer,
    pub ie: u8,
    pub iflag: u8,
    pub serial_buffer: String,
    pub cpu: Cpu,
    pub logger: Logger,
}

impl Context {
    pub fn new() -> Self {
        Context {
            cart: None,
            wram: [0; 0x2000],
            hram: [0; 0x7F],
            scheduler: Scheduler::new(),
            timer: Timer::new(),
            ie: 0,
            iflag: 0,
            serial_buffer: String::new(),
            cpu: Cpu::new(),
            logger: Logger::new(),
        }
    }

    pub fn load_cart(&mut self, bytes: Vec<u8>) -> Result<(), LoadError> {
        let cart = Cartridge::load(bytes)?;
        self.cart = Some(cart);
        Ok(())
    }

    /// Reinstates power-on state: registers, scheduler, timer and pending
    /// interrupts. Does not touch the loaded cartridge, WRAM, or HRAM.
    pub fn reset(&mut self) {
        self.cpu = Cpu::new();
        self.scheduler = Scheduler::new();
        self.timer = Timer::new();
        self.ie = 0;
        self.iflag = 0;
        self.serial_buffer.clear();
    }
}

pub fn init() -> Context {
    Context::new()
}

impl disasm::PeekBus for Context {
    fn peek(&self, addr: u16) -> u8 {
        crate::bus::peek(self, addr)
    }
}
