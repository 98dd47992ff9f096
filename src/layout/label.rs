use super::ChannelRole;
use num_enum::{IntoPrimitive, TryFromPrimitive};

const DISCRETE_BASE: u32 = 1 << 16;
const HOA_ACN_BASE: u32 = 2 << 16;

#[doc = r#"
The named Core Audio channel labels that carry a speaker position.

A channel description may also hold `Discrete_N` (`0x10000 | N`) or
`HOA_ACN_N` (`0x20000 | N`); those are handled by [`role_for_label`].
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum ChannelLabel {
    /// L
    Left = 1,
    /// R
    Right = 2,
    /// C
    Center = 3,
    /// LFE
    LfeScreen = 4,
    /// Ls
    LeftSurround = 5,
    /// Rs
    RightSurround = 6,
    /// Lc
    LeftCenter = 7,
    /// Rc
    RightCenter = 8,
    /// Cs
    CenterSurround = 9,
    /// Lsd
    LeftSurroundDirect = 10,
    /// Rsd
    RightSurroundDirect = 11,
    /// Ts
    TopCenterSurround = 12,
    /// Vhl
    VerticalHeightLeft = 13,
    /// Vhc
    VerticalHeightCenter = 14,
    /// Vhr
    VerticalHeightRight = 15,
    /// Top back left
    TopBackLeft = 16,
    /// Top back centre
    TopBackCenter = 17,
    /// Top back right
    TopBackRight = 18,
    /// Rls
    RearSurroundLeft = 33,
    /// Rrs
    RearSurroundRight = 34,
    /// Lw
    LeftWide = 35,
    /// Rw
    RightWide = 36,
    /// LFE2
    Lfe2 = 37,
    /// Ltm
    LeftTopMiddle = 49,
    /// Rtm
    RightTopMiddle = 51,
    /// B-format W
    AmbisonicW = 200,
    /// B-format X
    AmbisonicX = 201,
    /// B-format Y
    AmbisonicY = 202,
    /// B-format Z
    AmbisonicZ = 203,
}

impl ChannelLabel {
    /// The speaker position this label names
    pub const fn role(self) -> ChannelRole {
        use ChannelRole::*;
        match self {
            Self::Left => Left,
            Self::Right => Right,
            Self::Center => Centre,
            Self::LfeScreen => Lfe,
            Self::LeftSurround => LeftSurround,
            Self::RightSurround => RightSurround,
            Self::LeftCenter => LeftCentre,
            Self::RightCenter => RightCentre,
            Self::CenterSurround => CentreSurround,
            Self::LeftSurroundDirect => LeftSurroundSide,
            Self::RightSurroundDirect => RightSurroundSide,
            Self::TopCenterSurround => TopMiddle,
            Self::VerticalHeightLeft => TopFrontLeft,
            Self::VerticalHeightCenter => TopFrontCentre,
            Self::VerticalHeightRight => TopFrontRight,
            Self::TopBackLeft => TopRearLeft,
            Self::TopBackCenter => TopRearCentre,
            Self::TopBackRight => TopRearRight,
            Self::RearSurroundLeft => LeftSurroundRear,
            Self::RearSurroundRight => RightSurroundRear,
            Self::LeftWide => WideLeft,
            Self::RightWide => WideRight,
            Self::Lfe2 => Lfe2,
            Self::LeftTopMiddle => TopSideLeft,
            Self::RightTopMiddle => TopSideRight,
            Self::AmbisonicW => Ambisonic(0),
            Self::AmbisonicX => Ambisonic(3),
            Self::AmbisonicY => Ambisonic(1),
            Self::AmbisonicZ => Ambisonic(2),
        }
    }
}

/// Role for a raw channel label, or `None` if the label carries no position.
pub fn role_for_label(label: u32) -> Option<ChannelRole> {
    if let Ok(named) = ChannelLabel::try_from(label) {
        return Some(named.role());
    }
    match label >> 16 {
        1 => Some(ChannelRole::Discrete((label - DISCRETE_BASE) as u16)),
        2 => Some(ChannelRole::Ambisonic((label - HOA_ACN_BASE) as u16)),
        _ => None,
    }
}

#[test]
fn named_labels() {
    assert_eq!(role_for_label(1), Some(ChannelRole::Left));
    assert_eq!(role_for_label(10), Some(ChannelRole::LeftSurroundSide));
    assert_eq!(role_for_label(33), Some(ChannelRole::LeftSurroundRear));
    assert_eq!(role_for_label(201), Some(ChannelRole::Ambisonic(3)));
    assert_eq!(u32::from(ChannelLabel::Lfe2), 37);
}

#[test]
fn numbered_labels() {
    assert_eq!(role_for_label(0x1_0005), Some(ChannelRole::Discrete(5)));
    assert_eq!(role_for_label(0x2_0003), Some(ChannelRole::Ambisonic(3)));
}

#[test]
fn unknown_labels() {
    assert_eq!(role_for_label(0), None);
    assert_eq!(role_for_label(0xFFFF_FFFF), None);
    assert_eq!(role_for_label(100), None);
}
