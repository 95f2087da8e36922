#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use super::ParamId;

/// A parameter change sent from a control thread to the engine.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParameterMessage {
    pub id: ParamId,
    /// Unipolar position in [0, 1]
    pub value: f32,
}

impl ParameterMessage {
    pub fn new(id: ParamId, value: f32) -> Self {
        Self { id, value }
    }
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ParameterMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ParameterMessage> {
    fn pop(&mut self) -> Option<ParameterMessage> {
        Consumer::pop(self).ok()
    }
}
