// Core interaction exports
pub mod animation;
pub mod deck;
pub mod gesture;
pub mod onboarding;

pub use animation::{ease_in_out, ExitSlide, Playback, Spring};
pub use deck::{Deck, DeckState, MatchDeck, OutcomeSink};
pub use gesture::{resolve_offset, DragSession, GestureTracker, Release};
pub use onboarding::{format_mobile_number, validate_mobile_number, MobileNumberError, OtpEntry, ResendCountdown};
