pub mod chain;
pub mod duration;
pub mod groove;
pub mod instrument;
pub mod pattern;
pub mod time;

pub use chain::{PatternChain, PatternProvider};
pub use duration::Duration;
pub use groove::{Groove, GrooveFunction, GrooveShape, IdentityGroove, PowerCurve};
pub use instrument::{ChannelId, ExtraKind, Instrument};
pub use pattern::{Pattern, PatternError, Scale, Step, STEPS};
pub use time::{bars_to_num_frames, num_frames_to_bars};
