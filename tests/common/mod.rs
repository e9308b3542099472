use rgb::context::Context;

const HEADER_TITLE_START: usize = 0x0134;
const HEADER_CHECKSUM_RANGE_END: usize = 0x014C;
const HEADER_CHECKSUM: usize = 0x014D;
const ENTRY_POINT: usize = 0x0100;
const MIN_ROM_SIZE: usize = 0x0150;

fn header_checksum(data: &[u8]) -> u8 {
    let mut sum: u8 = 0;
    for &byte in &data[HEADER_TITLE_START..=HEADER_CHECKSUM_RANGE_END] {
        sum = sum.wrapping_sub(byte).wrapping_sub(1);
    }
    sum
}

/// Builds a minimal ROM-only cartridge image with `code` placed at the
/// entry point (0x0100), a valid header checksum, and enough trailing NOPs
/// that falling off the end of `code` doesn't walk into header bytes.
pub fn rom_with_code(code: &[u8]) -> Vec<u8> {
    let mut data = vec![0u8; MIN_ROM_SIZE.max(ENTRY_POINT + code.len() + 1)];
    data[ENTRY_POINT..ENTRY_POINT + code.len()].copy_from_slice(code);
    let csum = header_checksum(&data);
    data[HEADER_CHECKSUM] = csum;
    data
}

pub fn context_with_code(code: &[u8]) -> Context {
    let mut ctx = Context::new();
    ctx.load_cart(rom_with_code(code)).expect("valid test rom");
    ctx
}
