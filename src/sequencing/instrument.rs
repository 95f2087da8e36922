//! The ten instruments and the nine physical channels they play on.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    BassDrum,
    SnareDrum,
    TomLow,
    TomMid,
    TomHi,
    Rim,
    Clap,
    Hihat,
    Crash,
    Ride,
}

/// What an `Extra` step means for a given instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraKind {
    /// Second, delayed strike
    Flam,
    /// Open instead of closed hihat
    OpenHihat,
}

impl Instrument {
    pub const COUNT: usize = 10;

    pub const ALL: [Instrument; Instrument::COUNT] = [
        Instrument::BassDrum,
        Instrument::SnareDrum,
        Instrument::TomLow,
        Instrument::TomMid,
        Instrument::TomHi,
        Instrument::Rim,
        Instrument::Clap,
        Instrument::Hihat,
        Instrument::Crash,
        Instrument::Ride,
    ];

    pub fn from_index(index: usize) -> Option<Instrument> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Physical output this instrument sounds on.
    pub fn channel(self) -> ChannelId {
        match self {
            Instrument::BassDrum => ChannelId::BassDrum,
            Instrument::SnareDrum => ChannelId::SnareDrum,
            Instrument::TomLow => ChannelId::TomLow,
            Instrument::TomMid => ChannelId::TomMid,
            Instrument::TomHi => ChannelId::TomHi,
            Instrument::Rim | Instrument::Clap => ChannelId::RimClap,
            Instrument::Hihat => ChannelId::Hihat,
            Instrument::Crash => ChannelId::Crash,
            Instrument::Ride => ChannelId::Ride,
        }
    }

    pub fn extra_kind(self) -> ExtraKind {
        match self {
            Instrument::Hihat => ExtraKind::OpenHihat,
            _ => ExtraKind::Flam,
        }
    }

    /// Lower-case name used in parameter paths.
    pub fn name(self) -> &'static str {
        match self {
            Instrument::BassDrum => "bassdrum",
            Instrument::SnareDrum => "snaredrum",
            Instrument::TomLow => "tom-low",
            Instrument::TomMid => "tom-mid",
            Instrument::TomHi => "tom-hi",
            Instrument::Rim => "rim",
            Instrument::Clap => "clap",
            Instrument::Hihat => "hihat",
            Instrument::Crash => "crash",
            Instrument::Ride => "ride",
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    BassDrum,
    SnareDrum,
    TomLow,
    TomMid,
    TomHi,
    RimClap,
    Hihat,
    Crash,
    Ride,
}

impl ChannelId {
    pub const COUNT: usize = 9;

    pub const ALL: [ChannelId; ChannelId::COUNT] = [
        ChannelId::BassDrum,
        ChannelId::SnareDrum,
        ChannelId::TomLow,
        ChannelId::TomMid,
        ChannelId::TomHi,
        ChannelId::RimClap,
        ChannelId::Hihat,
        ChannelId::Crash,
        ChannelId::Ride,
    ];

    pub fn from_index(index: usize) -> Option<ChannelId> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_order() {
        for (index, instrument) in Instrument::ALL.iter().enumerate() {
            assert_eq!(instrument.index(), index);
            assert_eq!(Instrument::from_index(index), Some(*instrument));
        }
        assert_eq!(Instrument::from_index(Instrument::COUNT), None);
        assert_eq!(ChannelId::from_index(ChannelId::COUNT), None);
    }

    #[test]
    fn rim_and_clap_share_a_channel() {
        assert_eq!(Instrument::Rim.channel(), Instrument::Clap.channel());
        let distinct: std::collections::HashSet<_> =
            Instrument::ALL.iter().map(|i| i.channel()).collect();
        assert_eq!(distinct.len(), ChannelId::COUNT);
    }

    #[test]
    fn only_hihat_opens() {
        for instrument in Instrument::ALL {
            let expected = if instrument == Instrument::Hihat {
                ExtraKind::OpenHihat
            } else {
                ExtraKind::Flam
            };
            assert_eq!(instrument.extra_kind(), expected);
        }
    }
}
