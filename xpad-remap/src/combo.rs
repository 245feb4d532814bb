use evdev_rs::enums::EV_KEY;

/// Actions triggered by holding a set of buttons together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combo {
    ToggleRemap,
}

// checked in order, the first fully held combo wins
const COMBOS: &[(Combo, &[EV_KEY])] = &[(
    Combo::ToggleRemap,
    &[EV_KEY::BTN_MODE, EV_KEY::BTN_START],
)];

const KEY_RELEASE: i32 = 0;
const KEY_PRESS: i32 = 1;

#[derive(Debug, Default)]
pub struct ComboTracker {
    held: Vec<EV_KEY>,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> &[EV_KEY] {
        &self.held
    }

    /// Feeds one `EV_KEY` event. Autorepeat (value 2) is ignored.
    pub fn handle_key(&mut self, key: EV_KEY, value: i32) -> Option<Combo> {
        match value {
            KEY_PRESS => {
                if !self.held.contains(&key) {
                    self.held.push(key);
                }
                let (combo, _) = COMBOS
                    .iter()
                    .find(|(_, keys)| keys.iter().all(|key| self.held.contains(key)))?;
                self.held.clear();
                Some(*combo)
            }
            KEY_RELEASE => {
                self.held.retain(|&held| held != key);
                None
            }
            _ => None,
        }
    }
}
