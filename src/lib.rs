#![no_std]

mod bus;
mod constants;

pub use bus::{InOutPin, ThreeWireBus};
pub use constants::*;
use embedded_hal::digital::OutputPin;
use heapless::Vec;
use num_traits::ToPrimitive;

pub struct TM1638<STB, CLK, DIO> {
    pub bus: ThreeWireBus<STB, CLK, DIO>,
    active: bool,
    intensity: u8,
}

impl<STB, CLK, DIO, E> TM1638<STB, CLK, DIO>
where
    STB: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
    DIO: InOutPin<Error = E>,
{
    /// Claims the pins and runs the power-on sequence, leaving the
    /// display active at full intensity with all cells blank.
    pub fn new(stb: STB, clk: CLK, dio: DIO) -> Result<Self, TM1638Error<E>> {
        let bus = ThreeWireBus::new(stb, clk, dio)?;
        let mut driver = Self {
            bus,
            active: false,
            intensity: 0,
        };
        driver.init()?;
        Ok(driver)
    }

    pub fn destroy(self) -> (STB, CLK, DIO) {
        self.bus.destroy()
    }

    fn init(&mut self) -> Result<(), TM1638Error<E>> {
        self.bus.send_command(command::WRITE_INCREMENT)?;
        self.setup(true, MAX_INTENSITY)?;
        self.bus.write_frame(command::ADDRESS_BASE, &[0; RAM_BYTES])?;
        Ok(())
    }

    /// Turns the display on or off and sets the intensity (0 to 7).
    pub fn setup(&mut self, active: bool, intensity: u8) -> Result<(), TM1638Error<E>> {
        if intensity > MAX_INTENSITY {
            return Err(TM1638Error::InvalidValue);
        }

        let mut control = command::DISPLAY_CONTROL | intensity;
        if active {
            control |= command::DISPLAY_ACTIVE;
        }
        self.bus.send_command(control)?;
        self.active = active;
        self.intensity = intensity;

        // the chip latches a control update on one strobed clock pulse
        self.bus.clock_pulse()?;
        Ok(())
    }

    pub fn set_intensity(&mut self, intensity: u8) -> Result<(), TM1638Error<E>> {
        self.setup(self.active, intensity)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    /// Writes a hex digit (0 to 15) to one display position, left to
    /// right. `None` blanks the position, leaving only the dot segment.
    pub fn set_digit(
        &mut self,
        position: u8,
        digit: Option<u8>,
        dot: bool,
    ) -> Result<(), TM1638Error<E>> {
        if position >= MAX_DIGITS {
            return Err(TM1638Error::InvalidLocation(position));
        }

        let mut data = if dot { DOT_MASK } else { 0 };
        if let Some(digit) = digit {
            if digit > 0x0F {
                return Err(TM1638Error::InvalidValue);
            }
            data |= NUMBERS[digit as usize];
        }

        // digits sit in the even RAM cells, LEDs in the odd ones
        self.bus.send_ram_data(position << 1, data)?;
        Ok(())
    }

    /// Shows `number` right justified in the given base (2 to 16),
    /// blanking unused leading positions. Zero renders fully blank, and
    /// numbers wider than the display keep only their lowest
    /// [`MAX_DIGITS`] digits.
    pub fn print_number<T>(&mut self, number: T, base: u8) -> Result<(), TM1638Error<E>>
    where
        T: ToPrimitive,
    {
        if base < 2 || base > 16 {
            return Err(TM1638Error::InvalidValue);
        }
        let mut value = number.to_u32().ok_or(TM1638Error::InvalidValue)?;

        let mut digits: Vec<u8, { MAX_DIGITS as usize }> = Vec::new();
        while value != 0 {
            if digits.push((value % base as u32) as u8).is_err() {
                break;
            }
            value /= base as u32;
        }

        let blank = MAX_DIGITS - digits.len() as u8;
        for position in 0..blank {
            self.set_digit(position, None, false)?;
        }
        for (i, &digit) in digits.iter().rev().enumerate() {
            self.set_digit(blank + i as u8, Some(digit), false)?;
        }
        Ok(())
    }

    pub fn set_led(&mut self, position: u8, color: LedColor) -> Result<(), TM1638Error<E>> {
        if position >= MAX_LEDS {
            return Err(TM1638Error::InvalidLocation(position));
        }
        self.bus.send_ram_data((position << 1) + 1, color as u8)?;
        Ok(())
    }

    /// Scans the keypad. Each scan byte carries one button of each
    /// half: bit 0 for buttons 0 to 3, bit 4 for buttons 4 to 7.
    pub fn get_buttons(&mut self) -> Result<[bool; MAX_BUTTONS], TM1638Error<E>> {
        let mut keys = [0; KEY_BYTES];
        self.bus.read_frame(command::READ_KEYS, &mut keys)?;

        let mut buttons = [false; MAX_BUTTONS];
        for (i, byte) in keys.iter().enumerate() {
            buttons[i] = byte & 0x01 != 0;
            buttons[i + KEY_BYTES] = byte & 0x10 != 0;
        }
        Ok(buttons)
    }

    /// Blanks all sixteen RAM cells, digits and LEDs both.
    pub fn clear(&mut self) -> Result<(), TM1638Error<E>> {
        self.bus.send_command(command::WRITE_INCREMENT)?;
        self.bus.write_frame(command::ADDRESS_BASE, &[0; RAM_BYTES])?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LedColor {
    Off = 0,
    Green = 1,
    Red = 2,
}

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TM1638Error<E> {
    PinError(E),
    InvalidValue,
    InvalidLocation(u8),
}

impl<E> From<E> for TM1638Error<E> {
    fn from(error: E) -> Self {
        TM1638Error::PinError(error)
    }
}
