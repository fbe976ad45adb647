//! Hidden Content Lock
//!
//! Hidden content is only materialized after the PIN has been accepted and
//! the hidden list fetched. The transitions are explicit here instead of
//! being inferred from whether the hidden list happens to be empty.

/// Lock state of the hidden-content view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    /// No authenticated session assumed; hidden content is not cached
    #[default]
    Locked,
    /// PIN submitted, hidden content not fetched yet
    Unlocking,
    /// Hidden content fetched and cached
    Unlocked,
}

impl LockState {
    pub fn on_pin_submitted(self) -> Self {
        match self {
            LockState::Unlocked => LockState::Unlocked,
            _ => LockState::Unlocking,
        }
    }

    pub fn on_pin_rejected(self) -> Self {
        match self {
            LockState::Unlocked => LockState::Unlocked,
            _ => LockState::Locked,
        }
    }

    pub fn on_hidden_loaded(self) -> Self {
        LockState::Unlocked
    }

    /// Explicit re-lock, a lapsed session, or a 403 on a mutating call
    pub fn on_relock(self) -> Self {
        LockState::Locked
    }

    pub fn is_unlocked(self) -> bool {
        self == LockState::Unlocked
    }
}

pub const PIN_LENGTH: usize = 4;

/// Client-side shape check before a PIN is sent
pub fn validate_pin(pin: &str) -> Result<(), PinError> {
    if !pin.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PinError::InvalidCharacters);
    }
    if pin.chars().count() != PIN_LENGTH {
        return Err(PinError::WrongLength);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    InvalidCharacters,
    WrongLength,
}

impl std::fmt::Display for PinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PinError::InvalidCharacters => write!(f, "Only numbers and letters are allowed."),
            PinError::WrongLength => write!(f, "pin can only be {} characters long", PIN_LENGTH),
        }
    }
}

impl std::error::Error for PinError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_flow() {
        let state = LockState::default();
        assert_eq!(state, LockState::Locked);

        let state = state.on_pin_submitted();
        assert_eq!(state, LockState::Unlocking);

        let state = state.on_hidden_loaded();
        assert!(state.is_unlocked());

        assert_eq!(state.on_relock(), LockState::Locked);
    }

    #[test]
    fn test_rejected_pin_relocks() {
        let state = LockState::Locked.on_pin_submitted().on_pin_rejected();
        assert_eq!(state, LockState::Locked);
    }

    #[test]
    fn test_pin_resubmit_keeps_unlocked_view() {
        let state = LockState::Unlocked.on_pin_submitted().on_pin_rejected();
        assert!(state.is_unlocked());
    }

    #[test]
    fn test_validate_pin() {
        assert_eq!(validate_pin("a1B2"), Ok(()));
        assert_eq!(validate_pin("123"), Err(PinError::WrongLength));
        assert_eq!(validate_pin("12345"), Err(PinError::WrongLength));
        assert_eq!(validate_pin("12-4"), Err(PinError::InvalidCharacters));
        assert_eq!(validate_pin(""), Err(PinError::WrongLength));
    }
}
