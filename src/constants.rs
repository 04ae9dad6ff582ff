pub const MAX_DIGITS: u8 = 8;
pub const MAX_LEDS: u8 = 8;
pub const MAX_INTENSITY: u8 = 7; // 3 bits
pub const MAX_BUTTONS: usize = 8;
pub const RAM_BYTES: usize = 16;
pub const KEY_BYTES: usize = 4;
pub const DOT_MASK: u8 = 0x80;
pub const NUMBERS: [u8; 16] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F, 0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71,
];

pub mod command {
    pub const WRITE_INCREMENT: u8 = 0x40; // write display RAM, auto-increment address
    pub const WRITE_FIXED: u8 = 0x44; // write display RAM at a fixed address
    pub const READ_KEYS: u8 = 0x42; // read the key scan matrix
    pub const ADDRESS_BASE: u8 = 0xC0; // set RAM address, cell in the low nibble
    pub const DISPLAY_CONTROL: u8 = 0x80; // display state and intensity
    pub const DISPLAY_ACTIVE: u8 = 0x08; // bit 3: display on
}
