use crate::{
    definitions::{cpu, timer},
    devices::{DisplayCommands, KeyboardCommands, SoundCommands},
    machine::{Cycle, Machine, Sound},
};

/// A summary of a single [`frame`](Runner::frame).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// The amount of cycles that were executed
    pub cycles: usize,
    /// The amount of cycles that reported a fault
    pub faults: usize,
    /// If the display was redrawn at the end of the frame
    pub drawn: bool,
}

/// Drives a [`Machine`](Machine) with the given devices.
///
/// The host calls [`frame`](Runner::frame) at its refresh rate, the runner executes a fixed
/// amount of cycles per frame, so that the emulated clock is decoupled from the display.
pub struct Runner<D, K, S>
where
    D: DisplayCommands,
    K: KeyboardCommands,
    S: SoundCommands,
{
    machine: Machine,
    display: D,
    keyboard: K,
    sound: S,
    cycles_per_frame: usize,
    playing: bool,
}

impl<D, K, S> Runner<D, K, S>
where
    D: DisplayCommands,
    K: KeyboardCommands,
    S: SoundCommands,
{
    pub fn new(machine: Machine, display: D, keyboard: K, sound: S) -> Self {
        Self {
            machine,
            display,
            keyboard,
            sound,
            cycles_per_frame: (cpu::HERTZ / timer::HERTZ) as usize,
            playing: false,
        }
    }

    /// Will change the amount of cycles executed per frame, at least one
    /// cycle is always executed.
    pub fn with_cycles_per_frame(mut self, cycles: usize) -> Self {
        self.cycles_per_frame = cycles.max(1);
        self
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    /// Runs a single frame: samples the keyboard, executes the cycles,
    /// drives the sound and redraws the display if needed.
    ///
    /// A machine waiting for a key still runs all of its cycles, so the timers
    /// keep their rate.
    pub fn frame(&mut self) -> Frame {
        let keys = self.keyboard.get_keyboard();
        self.machine.set_keyboard(&keys);

        let mut frame = Frame::default();
        for _ in 0..self.cycles_per_frame {
            let cycle = self.machine.step();
            frame.cycles += 1;
            if cycle.fault.is_some() {
                frame.faults += 1;
            }
            self.update_sound(&cycle);
        }

        if self.machine.draw_flag() {
            self.display.display(self.machine.display());
            self.machine.clear_draw_flag();
            frame.drawn = true;
        }
        frame
    }

    fn update_sound(&mut self, cycle: &Cycle) {
        let audible = self.machine.sound_timer() > 0;
        if self.playing && (cycle.sound == Some(Sound::Stop) || !audible) {
            log::debug!("sound off");
            self.sound.stop();
            self.playing = false;
        } else if !self.playing && audible {
            log::debug!("sound on");
            self.sound.start();
            self.playing = true;
        }
    }
}
