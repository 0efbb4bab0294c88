//! Direct-GPIO key bank reader.
//!
//! The 12-key board wires each key straight to a GPIO: internal
//! pull-up, switch to ground, so a pressed key reads low. One level
//! read per key per cycle; no interrupts, no debouncing beyond the
//! poll-interval rate limit.

use crate::error::InputError;

use super::hw_init;

pub struct GpioKeys {
    gpios: &'static [i32],
}

impl GpioKeys {
    /// `gpios[i]` is the pin for key index `i`; the pins must already
    /// be configured by [`hw_init::init_key_gpios`].
    pub fn new(gpios: &'static [i32]) -> Self {
        Self { gpios }
    }

    pub fn key_count(&self) -> usize {
        self.gpios.len()
    }

    pub fn read(&mut self, samples: &mut [bool]) -> Result<(), InputError> {
        if samples.len() != self.gpios.len() {
            return Err(InputError::LengthMismatch);
        }
        for (sample, &pin) in samples.iter_mut().zip(self.gpios) {
            // Active-low: pressed pulls the pin to ground.
            *sample = !hw_init::gpio_read(pin);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::KEY_GPIOS_12;

    #[test]
    fn buffer_length_must_match_bank() {
        let mut keys = GpioKeys::new(&KEY_GPIOS_12);
        let mut short = [false; 4];
        assert_eq!(keys.read(&mut short), Err(InputError::LengthMismatch));
    }

    #[test]
    fn sim_reads_idle_as_released() {
        // Host gpio_read returns the pull-up idle level.
        let mut keys = GpioKeys::new(&KEY_GPIOS_12);
        let mut samples = [true; 12];
        keys.read(&mut samples).unwrap();
        assert!(samples.iter().all(|&s| !s));
    }
}
