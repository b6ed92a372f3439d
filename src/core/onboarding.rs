//! State models behind the onboarding screens: mobile number entry,
//! one-time-code entry and the resend countdown.

use thiserror::Error;

pub const MIN_MOBILE_DIGITS: usize = 10;
pub const MAX_MOBILE_LENGTH: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MobileNumberError {
    #[error("Please enter a mobile number")]
    Missing,

    #[error("Please enter a valid mobile number")]
    TooShort,

    #[error("Mobile number is longer than 15 characters")]
    TooLong,
}

/// Validate a mobile number and return it trimmed
pub fn validate_mobile_number(input: &str) -> Result<&str, MobileNumberError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MobileNumberError::Missing);
    }
    let length = trimmed.chars().count();
    if length < MIN_MOBILE_DIGITS {
        return Err(MobileNumberError::TooShort);
    }
    if length > MAX_MOBILE_LENGTH {
        return Err(MobileNumberError::TooLong);
    }
    Ok(trimmed)
}

/// Format a number as `xxx-xxx-rest` once it has at least 10 characters
pub fn format_mobile_number(number: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    if chars.len() < MIN_MOBILE_DIGITS {
        return number.to_string();
    }
    let head: String = chars[..3].iter().collect();
    let middle: String = chars[3..6].iter().collect();
    let tail: String = chars[6..].iter().collect();
    format!("{}-{}-{}", head, middle, tail)
}

/// One-time-code input split into single-digit slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpEntry {
    slots: Vec<Option<char>>,
    focus: usize,
}

impl OtpEntry {
    pub fn new(length: usize) -> Self {
        Self {
            slots: vec![None; length.max(1)],
            focus: 0,
        }
    }

    /// Number of slots, fixed at construction
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no slot holds a digit
    pub fn is_blank(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Index of the slot that has input focus
    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn set_focus(&mut self, index: usize) {
        if index < self.slots.len() {
            self.focus = index;
        }
    }

    /// Put text into a slot; an empty string clears it
    ///
    /// Only the first character is kept and non-digits are rejected.
    /// Entering a digit moves focus to the next slot.
    pub fn set_digit(&mut self, index: usize, text: &str) {
        if index >= self.slots.len() {
            return;
        }
        match text.chars().next() {
            None => self.slots[index] = None,
            Some(c) if c.is_ascii_digit() => {
                self.slots[index] = Some(c);
                if index + 1 < self.slots.len() {
                    self.focus = index + 1;
                }
            }
            Some(_) => {}
        }
    }

    /// Backspace on an empty slot moves focus to the previous one
    pub fn backspace(&mut self, index: usize) {
        if index >= self.slots.len() {
            return;
        }
        if self.slots[index].is_none() && index > 0 {
            self.focus = index - 1;
        }
    }

    /// Joined code, only once every slot is filled
    pub fn code(&self) -> Option<String> {
        self.slots.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.focus = 0;
    }
}

/// Seconds-based countdown gating the "resend code" action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendCountdown {
    cooldown_secs: u32,
    remaining_secs: u32,
    can_resend: bool,
}

impl ResendCountdown {
    pub fn new(cooldown_secs: u32) -> Self {
        Self {
            cooldown_secs,
            remaining_secs: cooldown_secs,
            can_resend: cooldown_secs == 0,
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn can_resend(&self) -> bool {
        self.can_resend
    }

    /// Called once per second
    pub fn tick(&mut self) {
        if self.remaining_secs <= 1 {
            self.remaining_secs = 0;
            self.can_resend = true;
        } else {
            self.remaining_secs -= 1;
        }
    }

    pub fn restart(&mut self) {
        self.remaining_secs = self.cooldown_secs;
        self.can_resend = self.cooldown_secs == 0;
    }
}
