pub mod channel;
pub mod events;
pub mod machine;
pub mod scheduler;

pub use channel::{Channel, VoiceId, MAX_CHANNEL_VOICES};
pub use events::{BlockEvents, PlayEvent, MAX_EVENTS};
pub use machine::Machine;
pub use scheduler::Scheduler;
