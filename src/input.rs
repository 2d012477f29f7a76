//! Debounced key state for the three game actions.
//!
//! ## Semantics
//!
//! | Action  | Behaviour                                                        |
//! |---------|------------------------------------------------------------------|
//! | `Left`  | Level-triggered: the ship moves every frame the key is held      |
//! | `Right` | Level-triggered: the ship moves every frame the key is held      |
//! | `Fire`  | Edge-triggered: a press arms one shot; holding does not re-arm   |
//!
//! A fire press arms the trigger.  The session consumes the armed shot with
//! [`FireTrigger::take`] only when it can actually fire; an unconsumed arm
//! stays pending.  After a shot the key must be released and pressed again
//! before the next one.
//!
//! Hosts feed either discrete [`InputEvent`]s through [`Controls::apply`] or
//! raw per-frame key levels through [`Controls::sync`], which turns level
//! changes into events.

/// The game's logical inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Fire,
}

/// A press or release of one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Action),
    Released(Action),
}

/// One-shot latch for the fire key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FireTrigger {
    held: bool,
    armed: bool,
}

impl FireTrigger {
    /// Key went down.  Arms the trigger unless it was already held.
    pub fn press(&mut self) {
        if !self.held {
            self.held = true;
            self.armed = true;
        }
    }

    /// Key went up.
    pub fn release(&mut self) {
        self.held = false;
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        self.held
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Consume the armed shot, if any.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }
}

/// Current input state read by the frame loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub fire: FireTrigger,
}

impl Controls {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(Action::Left) => self.left = true,
            InputEvent::Released(Action::Left) => self.left = false,
            InputEvent::Pressed(Action::Right) => self.right = true,
            InputEvent::Released(Action::Right) => self.right = false,
            InputEvent::Pressed(Action::Fire) => self.fire.press(),
            InputEvent::Released(Action::Fire) => self.fire.release(),
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Fire => self.fire.is_held(),
        }
    }

    /// Reconcile with the host's current key level, emitting an event on change.
    pub fn sync(&mut self, action: Action, pressed: bool) -> Option<InputEvent> {
        if self.is_held(action) == pressed {
            return None;
        }
        let event = if pressed {
            InputEvent::Pressed(action)
        } else {
            InputEvent::Released(action)
        };
        self.apply(event);
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_arms_exactly_one_shot() {
        let mut t = FireTrigger::default();
        t.press();
        assert!(t.take());
        assert!(!t.take(), "holding must not re-arm");
    }

    #[test]
    fn repeated_press_without_release_does_not_rearm() {
        let mut t = FireTrigger::default();
        t.press();
        assert!(t.take());
        t.press(); // e.g. OS key repeat
        assert!(!t.take());
        t.release();
        t.press();
        assert!(t.take());
    }

    #[test]
    fn unconsumed_arm_survives_release() {
        let mut t = FireTrigger::default();
        t.press();
        t.release();
        assert!(t.is_armed());
        assert!(t.take());
    }

    #[test]
    fn sync_emits_events_only_on_level_change() {
        let mut c = Controls::default();
        assert_eq!(c.sync(Action::Left, false), None);
        assert_eq!(
            c.sync(Action::Left, true),
            Some(InputEvent::Pressed(Action::Left))
        );
        assert_eq!(c.sync(Action::Left, true), None);
        assert!(c.left);
        assert_eq!(
            c.sync(Action::Left, false),
            Some(InputEvent::Released(Action::Left))
        );
        assert!(!c.left);
    }

    #[test]
    fn held_fire_through_sync_fires_once() {
        let mut c = Controls::default();
        let mut shots = 0;
        for _ in 0..10 {
            c.sync(Action::Fire, true);
            if c.fire.take() {
                shots += 1;
            }
        }
        assert_eq!(shots, 1);
    }
}
