use crate::definitions::keyboard;

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will display all from the pixels, one byte per pixel row-major
    /// (`0` off, `1` on)
    fn display(&mut self, pixels: &[u8]);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for reading the keyboard data
pub trait KeyboardCommands {
    /// Will return the current state of all the keys
    fn get_keyboard(&mut self) -> [bool; keyboard::SIZE];
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for turning the sound on and off
pub trait SoundCommands {
    /// The sound timer was set, a tone shall be played
    fn start(&mut self);
    /// The sound timer ran out, the tone shall stop
    fn stop(&mut self);
}

/// Will represent the internal keyboard
///
/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
#[derive(Default, Debug, Clone)]
pub struct Keyboard {
    keys: [bool; keyboard::SIZE],
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    pub fn reset(&mut self) {
        self.keys = [false; keyboard::SIZE];
    }

    /// Will set the value of the given key, keys outside of `0-F` are ignored
    pub fn set_key(&mut self, key: usize, to: bool) {
        if let Some(entry) = self.keys.get_mut(key) {
            *entry = to;
        } else {
            log::warn!("Ignoring state change of unknown key {:#X}", key);
        }
    }

    pub fn toggle_key(&mut self, key: usize) {
        if let Some(&current) = self.keys.get(key) {
            self.set_key(key, !current)
        }
    }

    /// Will overwrite all the keys at once
    pub fn set_mult(&mut self, keys: &[bool; keyboard::SIZE]) {
        self.keys.copy_from_slice(keys);
    }

    pub fn get_keys(&self) -> &[bool] {
        &self.keys
    }

    /// Checks the given key, as the key usually comes from a register
    /// only the low nibble is taken into account.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0x0F) as usize]
    }

    /// Will return the lowest key that is currently pressed
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&down| down).map(|key| key as u8)
    }
}
