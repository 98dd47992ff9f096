#![doc = r#"
Core Audio channel layout tags and the static table of their speaker orders

# Overview

A layout tag packs a layout index into the upper 16 bits and the channel count into
the lower 16 bits. Most tags name a fixed speaker order; those are listed in
[`KNOWN_LAYOUTS`]. A handful of tags are special:

- [`LayoutTag::USE_CHANNEL_DESCRIPTIONS`]: the roles come from per-channel labels
- [`LayoutTag::USE_CHANNEL_BITMAP`]: the roles come from a WAVE-style speaker mask
- [`LayoutTag::DISCRETE_IN_ORDER`]: `n` channels without speaker positions
- [`LayoutTag::HOA_ACN_SN3D`] and [`LayoutTag::HOA_ACN_N3D`]: `n` ambisonic components
  in ACN order

Some table entries have a well known equivalent role set (stereo, 5.1, 7.1 and so on).
For those, [`LayoutTag::for_role_set`] maps the set back to exactly that tag.
"#]

use super::{ChannelRole, ChannelRoleSet, role::ambisonic_order_for};
use std::fmt;
use ChannelRole::*;

#[doc = r#"
A Core Audio `AudioChannelLayoutTag`.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutTag(u32);

const fn tag(index: u32, channels: u32) -> LayoutTag {
    LayoutTag((index << 16) | channels)
}

impl LayoutTag {
    /// Roles come from the channel descriptions
    pub const USE_CHANNEL_DESCRIPTIONS: Self = tag(0, 0);
    /// Roles come from the channel bitmap
    pub const USE_CHANNEL_BITMAP: Self = tag(1, 0);
    /// `n` discrete channels. Combine with the count through [`LayoutTag::with_channels`].
    pub const DISCRETE_IN_ORDER: Self = tag(147, 0);
    /// Higher order ambisonics, ACN order, SN3D normalisation
    pub const HOA_ACN_SN3D: Self = tag(190, 0);
    /// Higher order ambisonics, ACN order, N3D normalisation
    pub const HOA_ACN_N3D: Self = tag(191, 0);
    /// Reserved "unknown" tag
    pub const UNKNOWN: Self = Self(0xFFFF_0000);
}

#[allow(missing_docs)]
impl LayoutTag {
    pub const MONO: Self = tag(100, 1);
    pub const STEREO: Self = tag(101, 2);
    pub const STEREO_HEADPHONES: Self = tag(102, 2);
    pub const MATRIX_STEREO: Self = tag(103, 2);
    pub const MID_SIDE: Self = tag(104, 2);
    pub const XY: Self = tag(105, 2);
    pub const BINAURAL: Self = tag(106, 2);
    pub const AMBISONIC_B_FORMAT: Self = tag(107, 4);
    pub const QUADRAPHONIC: Self = tag(108, 4);
    pub const PENTAGONAL: Self = tag(109, 5);
    pub const HEXAGONAL: Self = tag(110, 6);
    pub const OCTAGONAL: Self = tag(111, 8);
    pub const CUBE: Self = tag(112, 8);
    pub const MPEG_3_0_A: Self = tag(113, 3);
    pub const MPEG_3_0_B: Self = tag(114, 3);
    pub const MPEG_4_0_A: Self = tag(115, 4);
    pub const MPEG_4_0_B: Self = tag(116, 4);
    pub const MPEG_5_0_A: Self = tag(117, 5);
    pub const MPEG_5_0_B: Self = tag(118, 5);
    pub const MPEG_5_0_C: Self = tag(119, 5);
    pub const MPEG_5_0_D: Self = tag(120, 5);
    pub const MPEG_5_1_A: Self = tag(121, 6);
    pub const MPEG_5_1_B: Self = tag(122, 6);
    pub const MPEG_5_1_C: Self = tag(123, 6);
    pub const MPEG_5_1_D: Self = tag(124, 6);
    pub const MPEG_6_1_A: Self = tag(125, 7);
    pub const MPEG_7_1_A: Self = tag(126, 8);
    pub const MPEG_7_1_B: Self = tag(127, 8);
    pub const MPEG_7_1_C: Self = tag(128, 8);
    pub const EMAGIC_DEFAULT_7_1: Self = tag(129, 8);
    pub const SMPTE_DTV: Self = tag(130, 8);
    pub const ITU_2_1: Self = tag(131, 3);
    pub const ITU_2_2: Self = tag(132, 4);
    pub const DVD_4: Self = tag(133, 3);
    pub const DVD_5: Self = tag(134, 4);
    pub const DVD_6: Self = tag(135, 5);
    pub const DVD_10: Self = tag(136, 4);
    pub const DVD_11: Self = tag(137, 5);
    pub const DVD_18: Self = tag(138, 5);
    pub const AUDIO_UNIT_6_0: Self = tag(139, 6);
    pub const AUDIO_UNIT_7_0: Self = tag(140, 7);
    pub const AAC_6_0: Self = tag(141, 6);
    pub const AAC_6_1: Self = tag(142, 7);
    pub const AAC_7_0: Self = tag(143, 7);
    pub const AAC_OCTAGONAL: Self = tag(144, 8);
    pub const TMH_10_2_STD: Self = tag(145, 16);
    pub const AUDIO_UNIT_7_0_FRONT: Self = tag(148, 7);
    pub const AC3_1_0_1: Self = tag(149, 2);
    pub const AC3_3_0: Self = tag(150, 3);
    pub const AC3_3_1: Self = tag(151, 4);
    pub const AC3_3_0_1: Self = tag(152, 4);
    pub const AC3_2_1_1: Self = tag(153, 4);
    pub const AC3_3_1_1: Self = tag(154, 5);
    pub const EAC_6_0_A: Self = tag(155, 6);
    pub const EAC_7_0_A: Self = tag(156, 7);
    pub const EAC3_6_1_A: Self = tag(157, 7);
    pub const EAC3_6_1_B: Self = tag(158, 7);
    pub const EAC3_6_1_C: Self = tag(159, 7);
    pub const EAC3_7_1_A: Self = tag(160, 8);
    pub const EAC3_7_1_B: Self = tag(161, 8);
    pub const EAC3_7_1_C: Self = tag(162, 8);
    pub const EAC3_7_1_D: Self = tag(163, 8);
    pub const EAC3_7_1_E: Self = tag(164, 8);
    pub const EAC3_7_1_F: Self = tag(165, 8);
    pub const EAC3_7_1_G: Self = tag(166, 8);
    pub const EAC3_7_1_H: Self = tag(167, 8);
    pub const DTS_3_1: Self = tag(168, 4);
    pub const DTS_4_1: Self = tag(169, 5);
    pub const DTS_6_0_A: Self = tag(170, 6);
    pub const DTS_6_0_B: Self = tag(171, 6);
    pub const DTS_6_0_C: Self = tag(172, 6);
    pub const DTS_6_1_A: Self = tag(173, 7);
    pub const DTS_6_1_B: Self = tag(174, 7);
    pub const DTS_6_1_C: Self = tag(175, 7);
    pub const DTS_7_0: Self = tag(176, 7);
    pub const DTS_7_1: Self = tag(177, 8);
    pub const DTS_8_0_A: Self = tag(178, 8);
    pub const DTS_8_0_B: Self = tag(179, 8);
    pub const DTS_8_1_A: Self = tag(180, 9);
    pub const DTS_8_1_B: Self = tag(181, 9);
    pub const DTS_6_1_D: Self = tag(182, 7);
    pub const AAC_7_1_B: Self = tag(183, 8);
    pub const AAC_7_1_C: Self = tag(184, 8);

    pub const MPEG_1_0: Self = Self::MONO;
    pub const MPEG_2_0: Self = Self::STEREO;
    pub const ITU_1_0: Self = Self::MONO;
    pub const ITU_2_0: Self = Self::STEREO;
    pub const ITU_3_0: Self = Self::MPEG_3_0_A;
    pub const ITU_3_1: Self = Self::MPEG_4_0_A;
    pub const ITU_3_2: Self = Self::MPEG_5_0_A;
    pub const ITU_3_2_1: Self = Self::MPEG_5_1_A;
    pub const ITU_3_4_1: Self = Self::MPEG_7_1_C;
    pub const DVD_0: Self = Self::MONO;
    pub const DVD_1: Self = Self::STEREO;
    pub const DVD_2: Self = Self::ITU_2_1;
    pub const DVD_3: Self = Self::ITU_2_2;
    pub const DVD_7: Self = Self::MPEG_3_0_A;
    pub const DVD_8: Self = Self::MPEG_4_0_A;
    pub const DVD_9: Self = Self::MPEG_5_0_A;
    pub const DVD_12: Self = Self::MPEG_5_1_A;
    pub const DVD_13: Self = Self::DVD_8;
    pub const DVD_14: Self = Self::DVD_9;
    pub const DVD_15: Self = Self::DVD_10;
    pub const DVD_16: Self = Self::DVD_11;
    pub const DVD_17: Self = Self::DVD_12;
    pub const DVD_19: Self = Self::MPEG_5_0_B;
    pub const DVD_20: Self = Self::MPEG_5_1_B;
    pub const AUDIO_UNIT_4: Self = Self::QUADRAPHONIC;
    pub const AUDIO_UNIT_5: Self = Self::PENTAGONAL;
    pub const AUDIO_UNIT_6: Self = Self::HEXAGONAL;
    pub const AUDIO_UNIT_8: Self = Self::OCTAGONAL;
    pub const AUDIO_UNIT_5_0: Self = Self::MPEG_5_0_B;
    pub const AUDIO_UNIT_5_1: Self = Self::MPEG_5_1_A;
    pub const AUDIO_UNIT_6_1: Self = Self::MPEG_6_1_A;
    pub const AUDIO_UNIT_7_1: Self = Self::MPEG_7_1_C;
    pub const AUDIO_UNIT_7_1_FRONT: Self = Self::MPEG_7_1_A;
    pub const AAC_3_0: Self = Self::MPEG_3_0_B;
    pub const AAC_QUADRAPHONIC: Self = Self::QUADRAPHONIC;
    pub const AAC_4_0: Self = Self::MPEG_4_0_B;
    pub const AAC_5_0: Self = Self::MPEG_5_0_D;
    pub const AAC_5_1: Self = Self::MPEG_5_1_D;
    pub const AAC_7_1: Self = Self::MPEG_7_1_B;
}

impl LayoutTag {
    /// Wrap a raw tag value
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Combine a channel-count-free tag such as [`LayoutTag::DISCRETE_IN_ORDER`] with a count
    pub const fn with_channels(self, channels: u16) -> Self {
        Self((self.0 & 0xFFFF_0000) | channels as u32)
    }

    /// The raw value
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// The layout index in the upper 16 bits
    pub const fn index(&self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// The channel count in the lower 16 bits
    pub const fn channel_count(&self) -> usize {
        (self.0 & 0xFFFF) as usize
    }

    /// The table entry for this tag, if it names a fixed speaker order
    pub fn known(&self) -> Option<&'static KnownLayout> {
        KNOWN_LAYOUTS.iter().find(|l| l.tag == *self)
    }

    #[doc = r#"
    The per-channel roles this tag implies, in the tag's own channel order.

    Returns `None` for [`USE_CHANNEL_DESCRIPTIONS`](LayoutTag::USE_CHANNEL_DESCRIPTIONS)
    and [`USE_CHANNEL_BITMAP`](LayoutTag::USE_CHANNEL_BITMAP), whose roles live
    elsewhere in the layout. Unknown tags give `Discrete(0..n)`.
    "#]
    pub fn roles(&self) -> Option<Vec<ChannelRole>> {
        let count = self.channel_count();
        let index = self.index();
        if *self == Self::USE_CHANNEL_DESCRIPTIONS || *self == Self::USE_CHANNEL_BITMAP {
            return None;
        }
        if index == Self::HOA_ACN_SN3D.index() || index == Self::HOA_ACN_N3D.index() {
            if ambisonic_order_for(count).is_some() {
                return Some((0..count).map(|n| Ambisonic(n as u16)).collect());
            }
            return Some(discrete_roles(count));
        }
        if let Some(known) = self.known() {
            return Some(known.roles.to_vec());
        }
        if index != Self::DISCRETE_IN_ORDER.index() {
            #[cfg(feature = "tracing")]
            tracing::debug!("Unknown layout tag {}, treating as discrete", self);
        }
        Some(discrete_roles(count))
    }

    #[doc = r#"
    The tag that describes `set`.

    Complete ambisonic sets map to [`HOA_ACN_SN3D`](LayoutTag::HOA_ACN_SN3D). Otherwise a
    table entry with a well known equivalent set wins over other entries with the same
    roles, and sets that no entry covers map to
    [`DISCRETE_IN_ORDER`](LayoutTag::DISCRETE_IN_ORDER).
    "#]
    pub fn for_role_set(set: &ChannelRoleSet) -> Self {
        let count = set.len() as u16;
        if set.ambisonic_order().is_some() {
            return Self::HOA_ACN_SN3D.with_channels(count);
        }
        let matches = |l: &&KnownLayout| l.roles.len() == set.len() && l.role_set() == *set;
        KNOWN_LAYOUTS
            .iter()
            .filter(|l| l.equivalent.is_some())
            .find(matches)
            .or_else(|| KNOWN_LAYOUTS.iter().find(matches))
            .map(|l| l.tag)
            .unwrap_or(Self::DISCRETE_IN_ORDER.with_channels(count))
    }
}

fn discrete_roles(count: usize) -> Vec<ChannelRole> {
    (0..count).map(|n| Discrete(n as u16)).collect()
}

impl fmt::Display for LayoutTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(known) = self.known() {
            return f.write_str(known.name);
        }
        let family = match self.index() {
            0 => "UseChannelDescriptions",
            1 => "UseChannelBitmap",
            147 => "DiscreteInOrder",
            190 => "HOA_ACN_SN3D",
            191 => "HOA_ACN_N3D",
            _ => return write!(f, "{:#010x}", self.0),
        };
        write!(f, "{}|{}", family, self.channel_count())
    }
}

impl From<u32> for LayoutTag {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<LayoutTag> for u32 {
    fn from(tag: LayoutTag) -> Self {
        tag.0
    }
}

/// One row of [`KNOWN_LAYOUTS`]
#[derive(Debug, Clone, Copy)]
pub struct KnownLayout {
    /// The tag
    pub tag: LayoutTag,
    /// Core Audio's name for the tag, without the `kAudioChannelLayoutTag_` prefix
    pub name: &'static str,
    /// Roles in the tag's channel order
    pub roles: &'static [ChannelRole],
    /// The well known role set this tag is the canonical encoding of, if any
    pub equivalent: Option<fn() -> ChannelRoleSet>,
}

impl KnownLayout {
    const fn new(tag: LayoutTag, name: &'static str, roles: &'static [ChannelRole]) -> Self {
        Self {
            tag,
            name,
            roles,
            equivalent: None,
        }
    }

    const fn documented(
        tag: LayoutTag,
        name: &'static str,
        roles: &'static [ChannelRole],
        equivalent: fn() -> ChannelRoleSet,
    ) -> Self {
        Self {
            tag,
            name,
            roles,
            equivalent: Some(equivalent),
        }
    }

    /// The roles as a set
    pub fn role_set(&self) -> ChannelRoleSet {
        ChannelRoleSet::from(self.roles)
    }
}

type T = LayoutTag;
type K = KnownLayout;

/// Every tag with a fixed speaker order, in tag order.
pub static KNOWN_LAYOUTS: &[KnownLayout] = &[
    K::documented(T::MONO, "Mono", &[Centre], ChannelRoleSet::mono),
    K::documented(T::STEREO, "Stereo", &[Left, Right], ChannelRoleSet::stereo),
    K::new(T::STEREO_HEADPHONES, "StereoHeadphones", &[Left, Right]),
    K::new(T::MATRIX_STEREO, "MatrixStereo", &[Left, Right]),
    K::new(T::MID_SIDE, "MidSide", &[Centre, Discrete(0)]),
    K::new(T::XY, "XY", &[Ambisonic(3), Ambisonic(1)]),
    K::new(T::BINAURAL, "Binaural", &[Left, Right]),
    K::new(
        T::AMBISONIC_B_FORMAT,
        "Ambisonic_B_Format",
        &[Ambisonic(0), Ambisonic(3), Ambisonic(1), Ambisonic(2)],
    ),
    K::documented(
        T::QUADRAPHONIC,
        "Quadraphonic",
        &[Left, Right, LeftSurround, RightSurround],
        ChannelRoleSet::quadraphonic,
    ),
    K::documented(
        T::PENTAGONAL,
        "Pentagonal",
        &[Left, Right, LeftSurroundRear, RightSurroundRear, Centre],
        ChannelRoleSet::pentagonal,
    ),
    K::documented(
        T::HEXAGONAL,
        "Hexagonal",
        &[Left, Right, LeftSurroundRear, RightSurroundRear, Centre, CentreSurround],
        ChannelRoleSet::hexagonal,
    ),
    K::documented(
        T::OCTAGONAL,
        "Octagonal",
        &[Left, Right, LeftSurround, RightSurround, Centre, CentreSurround, WideLeft, WideRight],
        ChannelRoleSet::octagonal,
    ),
    K::new(
        T::CUBE,
        "Cube",
        &[
            Left,
            Right,
            LeftSurround,
            RightSurround,
            TopFrontLeft,
            TopFrontRight,
            TopRearLeft,
            TopRearRight,
        ],
    ),
    K::documented(T::MPEG_3_0_A, "MPEG_3_0_A", &[Left, Right, Centre], ChannelRoleSet::lcr),
    K::new(T::MPEG_3_0_B, "MPEG_3_0_B", &[Centre, Left, Right]),
    K::documented(
        T::MPEG_4_0_A,
        "MPEG_4_0_A",
        &[Left, Right, Centre, CentreSurround],
        ChannelRoleSet::lcrs,
    ),
    K::new(T::MPEG_4_0_B, "MPEG_4_0_B", &[Centre, Left, Right, CentreSurround]),
    K::documented(
        T::MPEG_5_0_A,
        "MPEG_5_0_A",
        &[Left, Right, Centre, LeftSurround, RightSurround],
        ChannelRoleSet::surround_5_0,
    ),
    K::new(T::MPEG_5_0_B, "MPEG_5_0_B", &[Left, Right, LeftSurround, RightSurround, Centre]),
    K::new(T::MPEG_5_0_C, "MPEG_5_0_C", &[Left, Centre, Right, LeftSurround, RightSurround]),
    K::new(T::MPEG_5_0_D, "MPEG_5_0_D", &[Centre, Left, Right, LeftSurround, RightSurround]),
    K::documented(
        T::MPEG_5_1_A,
        "MPEG_5_1_A",
        &[Left, Right, Centre, Lfe, LeftSurround, RightSurround],
        ChannelRoleSet::surround_5_1,
    ),
    K::new(T::MPEG_5_1_B, "MPEG_5_1_B", &[Left, Right, LeftSurround, RightSurround, Centre, Lfe]),
    K::new(T::MPEG_5_1_C, "MPEG_5_1_C", &[Left, Centre, Right, LeftSurround, RightSurround, Lfe]),
    K::new(T::MPEG_5_1_D, "MPEG_5_1_D", &[Centre, Left, Right, LeftSurround, RightSurround, Lfe]),
    K::documented(
        T::MPEG_6_1_A,
        "MPEG_6_1_A",
        &[Left, Right, Centre, Lfe, LeftSurround, RightSurround, CentreSurround],
        ChannelRoleSet::surround_6_1,
    ),
    K::documented(
        T::MPEG_7_1_A,
        "MPEG_7_1_A",
        &[Left, Right, Centre, Lfe, LeftSurround, RightSurround, LeftCentre, RightCentre],
        ChannelRoleSet::surround_7_1_sdds,
    ),
    K::new(
        T::MPEG_7_1_B,
        "MPEG_7_1_B",
        &[Centre, LeftCentre, RightCentre, Left, Right, LeftSurround, RightSurround, Lfe],
    ),
    K::documented(
        T::MPEG_7_1_C,
        "MPEG_7_1_C",
        &[
            Left,
            Right,
            Centre,
            Lfe,
            LeftSurroundSide,
            RightSurroundSide,
            LeftSurroundRear,
            RightSurroundRear,
        ],
        ChannelRoleSet::surround_7_1,
    ),
    K::new(
        T::EMAGIC_DEFAULT_7_1,
        "Emagic_Default_7_1",
        &[Left, Right, LeftSurround, RightSurround, Centre, Lfe, LeftCentre, RightCentre],
    ),
    K::new(
        T::SMPTE_DTV,
        "SMPTE_DTV",
        &[Left, Right, Centre, Lfe, LeftSurround, RightSurround, Discrete(0), Discrete(1)],
    ),
    K::documented(T::ITU_2_1, "ITU_2_1", &[Left, Right, CentreSurround], ChannelRoleSet::lrs),
    K::new(T::ITU_2_2, "ITU_2_2", &[Left, Right, LeftSurround, RightSurround]),
    K::new(T::DVD_4, "DVD_4", &[Left, Right, Lfe]),
    K::new(T::DVD_5, "DVD_5", &[Left, Right, Lfe, CentreSurround]),
    K::new(T::DVD_6, "DVD_6", &[Left, Right, Lfe, LeftSurround, RightSurround]),
    K::new(T::DVD_10, "DVD_10", &[Left, Right, Centre, Lfe]),
    K::new(T::DVD_11, "DVD_11", &[Left, Right, Centre, Lfe, CentreSurround]),
    K::new(T::DVD_18, "DVD_18", &[Left, Right, LeftSurround, RightSurround, Lfe]),
    K::documented(
        T::AUDIO_UNIT_6_0,
        "AudioUnit_6_0",
        &[Left, Right, LeftSurround, RightSurround, Centre, CentreSurround],
        ChannelRoleSet::surround_6_0,
    ),
    K::documented(
        T::AUDIO_UNIT_7_0,
        "AudioUnit_7_0",
        &[
            Left,
            Right,
            LeftSurroundSide,
            RightSurroundSide,
            Centre,
            LeftSurroundRear,
            RightSurroundRear,
        ],
        ChannelRoleSet::surround_7_0,
    ),
    K::new(
        T::AAC_6_0,
        "AAC_6_0",
        &[Centre, Left, Right, LeftSurround, RightSurround, CentreSurround],
    ),
    K::new(
        T::AAC_6_1,
        "AAC_6_1",
        &[Centre, Left, Right, LeftSurround, RightSurround, CentreSurround, Lfe],
    ),
    K::new(
        T::AAC_7_0,
        "AAC_7_0",
        &[Centre, Left, Right, LeftSurround, RightSurround, LeftSurroundRear, RightSurroundRear],
    ),
    K::new(
        T::AAC_OCTAGONAL,
        "AAC_Octagonal",
        &[
            Centre,
            Left,
            Right,
            LeftSurround,
            RightSurround,
            LeftSurroundRear,
            RightSurroundRear,
            CentreSurround,
        ],
    ),
    K::new(
        T::TMH_10_2_STD,
        "TMH_10_2_std",
        &[
            Left,
            Right,
            Centre,
            TopFrontCentre,
            LeftSurroundSide,
            RightSurroundSide,
            LeftSurround,
            RightSurround,
            TopFrontLeft,
            TopFrontRight,
            WideLeft,
            WideRight,
            TopRearCentre,
            CentreSurround,
            Lfe,
            Lfe2,
        ],
    ),
    K::documented(
        T::AUDIO_UNIT_7_0_FRONT,
        "AudioUnit_7_0_Front",
        &[Left, Right, LeftSurround, RightSurround, Centre, LeftCentre, RightCentre],
        ChannelRoleSet::surround_7_0_sdds,
    ),
    K::new(T::AC3_1_0_1, "AC3_1_0_1", &[Centre, Lfe]),
    K::new(T::AC3_3_0, "AC3_3_0", &[Left, Centre, Right]),
    K::new(T::AC3_3_1, "AC3_3_1", &[Left, Centre, Right, CentreSurround]),
    K::new(T::AC3_3_0_1, "AC3_3_0_1", &[Left, Centre, Right, Lfe]),
    K::new(T::AC3_2_1_1, "AC3_2_1_1", &[Left, Right, CentreSurround, Lfe]),
    K::new(T::AC3_3_1_1, "AC3_3_1_1", &[Left, Centre, Right, CentreSurround, Lfe]),
    K::new(
        T::EAC_6_0_A,
        "EAC_6_0_A",
        &[Left, Centre, Right, LeftSurround, RightSurround, CentreSurround],
    ),
    K::new(
        T::EAC_7_0_A,
        "EAC_7_0_A",
        &[Left, Centre, Right, LeftSurround, RightSurround, LeftSurroundRear, RightSurroundRear],
    ),
    K::new(
        T::EAC3_6_1_A,
        "EAC3_6_1_A",
        &[Left, Centre, Right, LeftSurround, RightSurround, Lfe, CentreSurround],
    ),
    K::new(
        T::EAC3_6_1_B,
        "EAC3_6_1_B",
        &[Left, Centre, Right, LeftSurround, RightSurround, Lfe, TopMiddle],
    ),
    K::new(
        T::EAC3_6_1_C,
        "EAC3_6_1_C",
        &[Left, Centre, Right, LeftSurround, RightSurround, Lfe, TopFrontCentre],
    ),
    K::new(
        T::EAC3_7_1_A,
        "EAC3_7_1_A",
        &[
            Left,
            Centre,
            Right,
            LeftSurround,
            RightSurround,
            Lfe,
            LeftSurroundRear,
            RightSurroundRear,
        ],
    ),
    K::new(
        T::EAC3_7_1_B,
        "EAC3_7_1_B",
        &[Left, Centre, Right, LeftSurround, RightSurround, Lfe, LeftCentre, RightCentre],
    ),
    K::new(
        T::EAC3_7_1_C,
        "EAC3_7_1_C",
        &[
            Left,
            Centre,
            Right,
            LeftSurround,
            RightSurround,
            Lfe,
            LeftSurroundSide,
            RightSurroundSide,
        ],
    ),
    K::new(
        T::EAC3_7_1_D,
        "EAC3_7_1_D",
        &[Left, Centre, Right, LeftSurround, RightSurround, Lfe, WideLeft, WideRight],
    ),
    K::new(
        T::EAC3_7_1_E,
        "EAC3_7_1_E",
        &[Left, Centre, Right, LeftSurround, RightSurround, Lfe, TopFrontLeft, TopFrontRight],
    ),
    K::new(
        T::EAC3_7_1_F,
        "EAC3_7_1_F",
        &[Left, Centre, Right, LeftSurround, RightSurround, Lfe, CentreSurround, TopMiddle],
    ),
    K::new(
        T::EAC3_7_1_G,
        "EAC3_7_1_G",
        &[Left, Centre, Right, LeftSurround, RightSurround, Lfe, CentreSurround, TopFrontCentre],
    ),
    K::new(
        T::EAC3_7_1_H,
        "EAC3_7_1_H",
        &[Left, Centre, Right, LeftSurround, RightSurround, Lfe, TopMiddle, TopFrontCentre],
    ),
    K::new(T::DTS_3_1, "DTS_3_1", &[Centre, Left, Right, Lfe]),
    K::new(T::DTS_4_1, "DTS_4_1", &[Centre, Left, Right, CentreSurround, Lfe]),
    K::documented(
        T::DTS_6_0_A,
        "DTS_6_0_A",
        &[LeftSurroundSide, RightSurroundSide, Left, Right, LeftSurround, RightSurround],
        ChannelRoleSet::surround_6_0_music,
    ),
    K::new(
        T::DTS_6_0_B,
        "DTS_6_0_B",
        &[Centre, Left, Right, LeftSurroundRear, RightSurroundRear, TopMiddle],
    ),
    K::new(
        T::DTS_6_0_C,
        "DTS_6_0_C",
        &[
            Centre,
            CentreSurround,
            LeftSurroundRear,
            RightSurroundRear,
            LeftSurroundSide,
            RightSurroundSide,
        ],
    ),
    K::documented(
        T::DTS_6_1_A,
        "DTS_6_1_A",
        &[LeftSurroundSide, RightSurroundSide, Left, Right, LeftSurround, RightSurround, Lfe],
        ChannelRoleSet::surround_6_1_music,
    ),
    K::new(
        T::DTS_6_1_B,
        "DTS_6_1_B",
        &[Centre, Left, Right, LeftSurroundRear, RightSurroundRear, TopMiddle, Lfe],
    ),
    K::new(
        T::DTS_6_1_C,
        "DTS_6_1_C",
        &[
            Centre,
            CentreSurround,
            LeftSurroundRear,
            RightSurroundRear,
            LeftSurroundSide,
            RightSurroundSide,
            Lfe,
        ],
    ),
    K::new(
        T::DTS_7_0,
        "DTS_7_0",
        &[LeftCentre, Centre, RightCentre, Left, Right, LeftSurround, RightSurround],
    ),
    K::new(
        T::DTS_7_1,
        "DTS_7_1",
        &[LeftCentre, Centre, RightCentre, Left, Right, LeftSurround, RightSurround, Lfe],
    ),
    K::new(
        T::DTS_8_0_A,
        "DTS_8_0_A",
        &[
            LeftCentre,
            RightCentre,
            Left,
            Right,
            LeftSurround,
            RightSurround,
            LeftSurroundRear,
            RightSurroundRear,
        ],
    ),
    K::new(
        T::DTS_8_0_B,
        "DTS_8_0_B",
        &[
            LeftCentre,
            Centre,
            RightCentre,
            Left,
            Right,
            LeftSurround,
            CentreSurround,
            RightSurround,
        ],
    ),
    K::new(
        T::DTS_8_1_A,
        "DTS_8_1_A",
        &[
            LeftCentre,
            RightCentre,
            Left,
            Right,
            LeftSurround,
            RightSurround,
            LeftSurroundRear,
            RightSurroundRear,
            Lfe,
        ],
    ),
    K::new(
        T::DTS_8_1_B,
        "DTS_8_1_B",
        &[
            LeftCentre,
            Centre,
            RightCentre,
            Left,
            Right,
            LeftSurround,
            CentreSurround,
            RightSurround,
            Lfe,
        ],
    ),
    K::new(
        T::DTS_6_1_D,
        "DTS_6_1_D",
        &[Centre, Left, Right, LeftSurround, RightSurround, Lfe, CentreSurround],
    ),
    K::new(
        T::AAC_7_1_B,
        "AAC_7_1_B",
        &[
            Centre,
            Left,
            Right,
            LeftSurround,
            RightSurround,
            LeftSurroundRear,
            RightSurroundRear,
            Lfe,
        ],
    ),
    K::new(
        T::AAC_7_1_C,
        "AAC_7_1_C",
        &[Centre, Left, Right, LeftSurround, RightSurround, Lfe, TopFrontLeft, TopFrontRight],
    ),
];

#[test]
fn tag_fields() {
    assert_eq!(LayoutTag::STEREO.value(), (101 << 16) | 2);
    assert_eq!(LayoutTag::TMH_10_2_STD.channel_count(), 16);
    assert_eq!(LayoutTag::DTS_8_1_B.index(), 181);
    assert_eq!(
        LayoutTag::DISCRETE_IN_ORDER.with_channels(3).value(),
        (147 << 16) | 3
    );
}

#[test]
fn tag_display() {
    assert_eq!(LayoutTag::MPEG_5_1_A.to_string(), "MPEG_5_1_A");
    assert_eq!(LayoutTag::ITU_3_2_1.to_string(), "MPEG_5_1_A");
    assert_eq!(
        LayoutTag::HOA_ACN_SN3D.with_channels(9).to_string(),
        "HOA_ACN_SN3D|9"
    );
    assert_eq!(LayoutTag::new(0x00C8_0002).to_string(), "0x00c80002");
}

#[test]
fn special_tag_roles() {
    assert_eq!(LayoutTag::USE_CHANNEL_DESCRIPTIONS.roles(), None);
    assert_eq!(LayoutTag::USE_CHANNEL_BITMAP.roles(), None);
    assert_eq!(
        LayoutTag::DISCRETE_IN_ORDER.with_channels(2).roles(),
        Some(vec![Discrete(0), Discrete(1)])
    );
    assert_eq!(
        LayoutTag::HOA_ACN_N3D.with_channels(4).roles(),
        Some(vec![Ambisonic(0), Ambisonic(1), Ambisonic(2), Ambisonic(3)])
    );
    assert_eq!(
        LayoutTag::HOA_ACN_SN3D.with_channels(3).roles(),
        Some(vec![Discrete(0), Discrete(1), Discrete(2)])
    );
    assert_eq!(
        LayoutTag::new(0x00C8_0002).roles(),
        Some(vec![Discrete(0), Discrete(1)])
    );
}

#[test]
fn reverse_lookup_falls_back() {
    assert_eq!(
        LayoutTag::for_role_set(&ChannelRoleSet::ambisonic(1)),
        LayoutTag::HOA_ACN_SN3D.with_channels(4)
    );
    assert_eq!(
        LayoutTag::for_role_set(&ChannelRoleSet::discrete(5)),
        LayoutTag::DISCRETE_IN_ORDER.with_channels(5)
    );
    assert_eq!(
        LayoutTag::for_role_set(&ChannelRoleSet::from([Centre, Lfe])),
        LayoutTag::AC3_1_0_1
    );
}
