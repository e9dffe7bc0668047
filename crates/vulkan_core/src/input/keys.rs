//! Pressed-state table indexed by key code
//!
//! The windowing layer forwards raw key events here; the rest of the
//! application reads the table. Key codes are GLFW's; the largest valid code
//! is declared as a constant rather than discovered at runtime.

use glfw::{Action, Modifiers};

use crate::backend::{VulkanError, VulkanResult};

/// Largest valid key code (GLFW_KEY_LAST)
pub const MAX_KEY_CODE: i32 = 348;

const KEY_TABLE_SIZE: usize = MAX_KEY_CODE as usize + 1;

/// Pressed-state table for keys and modifier flags
pub struct KeyState {
    pressed: [bool; KEY_TABLE_SIZE],
    ctrl: bool,
    alt: bool,
    shift: bool,
}

impl KeyState {
    /// Create a table with nothing pressed
    pub fn new() -> Self {
        Self {
            pressed: [false; KEY_TABLE_SIZE],
            ctrl: false,
            alt: false,
            shift: false,
        }
    }

    fn index(code: i32) -> VulkanResult<usize> {
        if (0..=MAX_KEY_CODE).contains(&code) {
            Ok(code as usize)
        } else {
            Err(VulkanError::IndexOutOfRange {
                index: i64::from(code),
                limit: MAX_KEY_CODE as usize,
            })
        }
    }

    /// Apply one key event from the windowing callback.
    ///
    /// Press and release update the table; repeats are ignored. Modifier
    /// flags are refreshed on every event.
    pub fn process_key_event(
        &mut self,
        code: i32,
        action: Action,
        modifiers: Modifiers,
    ) -> VulkanResult<()> {
        let index = Self::index(code)?;
        match action {
            Action::Press => self.pressed[index] = true,
            Action::Release => self.pressed[index] = false,
            Action::Repeat => {}
        }
        self.ctrl = modifiers.contains(Modifiers::Control);
        self.alt = modifiers.contains(Modifiers::Alt);
        self.shift = modifiers.contains(Modifiers::Shift);
        Ok(())
    }

    /// Whether the key is currently pressed
    pub fn is_pressed(&self, code: i32) -> VulkanResult<bool> {
        Ok(self.pressed[Self::index(code)?])
    }

    /// Mark a key pressed
    pub fn set_pressed(&mut self, code: i32) -> VulkanResult<()> {
        self.pressed[Self::index(code)?] = true;
        Ok(())
    }

    /// Mark a key released
    pub fn set_released(&mut self, code: i32) -> VulkanResult<()> {
        self.pressed[Self::index(code)?] = false;
        Ok(())
    }

    /// Whether a control key is held
    pub fn ctrl_pressed(&self) -> bool {
        self.ctrl
    }

    /// Whether an alt key is held
    pub fn alt_pressed(&self) -> bool {
        self.alt
    }

    /// Whether a shift key is held
    pub fn shift_pressed(&self) -> bool {
        self.shift
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new()
    }
}
