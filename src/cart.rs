use std::fmt;

const HEADER_TITLE_START: usize = 0x0134;
const HEADER_CHECKSUM_RANGE_END: usize = 0x014C;
const HEADER_TYPE: usize = 0x0147;
const HEADER_CHECKSUM: usize = 0x014D;
const MIN_ROM_SIZE: usize = 0x0150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    BadHeaderSize,
    InvalidChecksum,
    UnsupportedMbc(u8),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::BadHeaderSize => write!(f, "rom image is smaller than a valid header"),
            LoadError::InvalidChecksum => write!(f, "header checksum does not match"),
            LoadError::UnsupportedMbc(ty) => write!(f, "unsupported cartridge type 0x{:02X}", ty),
        }
    }
}

impl std::error::Error for LoadError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mbc {
    RomOnly,
    Mbc1 { rom_bank: u8 },
}

pub struct Cartridge {
    data: Vec<u8>,
    mbc: Mbc,
}

fn header_checksum(data: &[u8]) -> u8 {
    let mut sum: u8 = 0;
    for &byte in &data[HEADER_TITLE_START..=HEADER_CHECKSUM_RANGE_END] {
        sum = sum.wrapping_sub(byte).wrapping_sub(1);
    }
    sum
}

impl Cartridge {
    pub fn load(data: Vec<u8>) -> Result<Self, LoadError> {
        if data.len() < MIN_ROM_SIZE {
            return Err(LoadError::BadHeaderSize);
        }
        if header_checksum(&data) != data[HEADER_CHECKSUM] {
            return Err(LoadError::InvalidChecksum);
        }
        let mbc = match data[HEADER_TYPE] {
            0x00 => Mbc::RomOnly,
            0x01 => Mbc::Mbc1 { rom_bank: 1 },
            other => return Err(LoadError::UnsupportedMbc(other)),
        };
        Ok(Cartridge { data, mbc })
    }

    pub fn title(&self) -> String {
        self.data[HEADER_TITLE_START..=0x0143]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect()
    }

    pub fn read(&self, addr: u16) -> u8 {
        match self.mbc {
            Mbc::RomOnly => self.data.get(addr as usize).copied().unwrap_or(0xFF),
            Mbc::Mbc1 { rom_bank } => {
                let index = if addr < 0x4000 {
                    addr as usize
                } else {
                    (addr as usize - 0x4000) + rom_bank as usize * 0x4000
                };
                self.data.get(index).copied().unwrap_or(0xFF)
            }
        }
    }

    /// Bank-select writes are reserved but not yet wired to a bank register;
    /// accepted and discarded rather than a generic unmapped-write warning.
    pub fn write(&mut self, _addr: u16, _value: u8) {}
}
