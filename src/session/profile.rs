use std::sync::Mutex;

use crate::lock_or_recover;

#[derive(Debug, Clone)]
struct ProfileState {
    nick: String,
    away: Option<String>,
}

/// The local user: nick and away status, shared by the session and the display.
#[derive(Debug)]
pub struct Profile {
    state: Mutex<ProfileState>,
}

impl Profile {
    pub fn new(nick: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(ProfileState {
                nick: nick.into(),
                away: None,
            }),
        }
    }

    pub fn nick(&self) -> String {
        lock_or_recover(&self.state, "profile").nick.clone()
    }

    pub fn set_nick(&self, nick: impl Into<String>) {
        lock_or_recover(&self.state, "profile").nick = nick.into();
    }

    pub fn away_message(&self) -> Option<String> {
        lock_or_recover(&self.state, "profile").away.clone()
    }

    pub fn is_away(&self) -> bool {
        lock_or_recover(&self.state, "profile").away.is_some()
    }

    pub fn set_away(&self, message: Option<String>) {
        lock_or_recover(&self.state, "profile").away = message;
    }
}
