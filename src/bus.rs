use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::constants::command;

/// Data pin that can switch direction at runtime, which the embedded-hal
/// digital traits do not cover. The line is driven open drain; the key
/// scan flips it to input and back.
pub trait InOutPin: OutputPin + InputPin {
    fn set_as_input(&mut self) -> Result<(), Self::Error>;
    fn set_as_output(&mut self) -> Result<(), Self::Error>;
}

/// Strobe-framed serial bus with a shared bidirectional data line.
/// Bytes travel least significant bit first in both directions.
pub struct ThreeWireBus<STB, CLK, DIO> {
    stb: STB,
    clk: CLK,
    dio: DIO,
}

impl<STB, CLK, DIO, E> ThreeWireBus<STB, CLK, DIO>
where
    STB: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
    DIO: InOutPin<Error = E>,
{
    /// Takes the pins to their idle state: data in output mode, clock
    /// and strobe high.
    pub fn new(stb: STB, clk: CLK, dio: DIO) -> Result<Self, E> {
        let mut bus = Self { stb, clk, dio };
        bus.dio.set_as_output()?;
        bus.clk.set_high()?;
        bus.stb.set_high()?;
        Ok(bus)
    }

    pub fn destroy(self) -> (STB, CLK, DIO) {
        (self.stb, self.clk, self.dio)
    }

    /// Shifts one byte out, LSB first. The strobe must already be low.
    pub fn send_byte(&mut self, byte: u8) -> Result<(), E> {
        let mut data = byte;
        for _ in 0..8 {
            self.clk.set_low()?;
            self.dio.set_state(PinState::from(data & 0x01 != 0))?;
            self.clk.set_high()?;
            data >>= 1;
        }
        Ok(())
    }

    /// Shifts one byte in, LSB first. The data line comes back to
    /// output mode even if the read failed partway.
    pub fn recv_byte(&mut self) -> Result<u8, E> {
        self.dio.set_as_input()?;
        let value = self.shift_in();
        self.dio.set_as_output()?;
        value
    }

    fn shift_in(&mut self) -> Result<u8, E> {
        let mut value = 0;
        for _ in 0..8 {
            value >>= 1;
            self.clk.set_low()?;
            if self.dio.is_high()? {
                value |= 0x80;
            }
            self.clk.set_high()?;
        }
        Ok(value)
    }

    /// Sends a single command byte in its own strobe window.
    pub fn send_command(&mut self, command: u8) -> Result<(), E> {
        self.stb.set_low()?;
        self.send_byte(command)?;
        self.stb.set_high()?;
        Ok(())
    }

    /// Writes one byte of display RAM. The chip wants the fixed-address
    /// command and the addressed write in two separate strobe windows.
    pub fn send_ram_data(&mut self, address: u8, data: u8) -> Result<(), E> {
        self.send_command(command::WRITE_FIXED)?;
        self.write_frame(command::ADDRESS_BASE | (address & 0x0F), &[data])?;
        Ok(())
    }

    /// One strobe window holding a command byte and a written payload.
    pub fn write_frame(&mut self, command: u8, data: &[u8]) -> Result<(), E> {
        self.stb.set_low()?;
        self.send_byte(command)?;
        for &byte in data {
            self.send_byte(byte)?;
        }
        self.stb.set_high()?;
        Ok(())
    }

    /// One strobe window holding a command byte and a read payload.
    pub fn read_frame(&mut self, command: u8, buffer: &mut [u8]) -> Result<(), E> {
        self.stb.set_low()?;
        self.send_byte(command)?;
        for byte in buffer.iter_mut() {
            *byte = self.recv_byte()?;
        }
        self.stb.set_high()?;
        Ok(())
    }

    /// Single clock pulse inside a strobe window, the latch sequence the
    /// chip expects after a display control command.
    pub fn clock_pulse(&mut self) -> Result<(), E> {
        self.stb.set_low()?;
        self.clk.set_low()?;
        self.clk.set_high()?;
        self.stb.set_high()?;
        Ok(())
    }
}
