use std::env;
use std::fs;
use std::process::ExitCode;

use rgb::context::Context;
use rgb::cpu;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    let rom_path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: rgb <rom-path>");
            return ExitCode::FAILURE;
        }
    };

    let bytes = match fs::read(&rom_path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("failed to read '{}': {}", rom_path, err);
            return ExitCode::FAILURE;
        }
    };

    let mut ctx = Context::new();
    if let Err(err) = ctx.load_cart(bytes) {
        eprintln!("failed to load '{}': {}", rom_path, err);
        return ExitCode::FAILURE;
    }

    loop {
        cpu::step(&mut ctx);
        if ctx.cpu.fatal {
            log::error!("cpu halted on unrecognised opcode at pc=0x{:04X}", ctx.cpu.pc);
            return ExitCode::FAILURE;
        }
    }
}
