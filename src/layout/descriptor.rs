use super::{ChannelRole, ChannelRoleSet, LayoutTag, role_for_label};
use crate::reader::{ByteReader, ReadResult};
use std::{
    collections::BTreeSet,
    io::{Read, Seek},
};

const DESCRIPTION_SIZE: u64 = 20;

/// WAVE speaker mask bits, lowest first
const BITMAP_ROLES: [ChannelRole; 18] = [
    ChannelRole::Left,
    ChannelRole::Right,
    ChannelRole::Centre,
    ChannelRole::Lfe,
    ChannelRole::LeftSurround,
    ChannelRole::RightSurround,
    ChannelRole::LeftCentre,
    ChannelRole::RightCentre,
    ChannelRole::CentreSurround,
    ChannelRole::LeftSurroundSide,
    ChannelRole::RightSurroundSide,
    ChannelRole::TopMiddle,
    ChannelRole::TopFrontLeft,
    ChannelRole::TopFrontCentre,
    ChannelRole::TopFrontRight,
    ChannelRole::TopRearLeft,
    ChannelRole::TopRearCentre,
    ChannelRole::TopRearRight,
];

/// One entry of a `chan` chunk's description list
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelDescription {
    /// Raw channel label
    pub label: u32,
    /// Coordinate flags
    pub flags: u32,
    /// Speaker coordinates, meaning set by `flags`
    pub coordinates: [f32; 3],
}

impl ChannelDescription {
    /// A description with only a label
    pub const fn with_label(label: u32) -> Self {
        Self {
            label,
            flags: 0,
            coordinates: [0.; 3],
        }
    }
}

#[doc = r#"
A channel layout as stored in a CAF `chan` chunk.

The tag decides where the channel roles come from: the tag itself, the bitmap, or the
per-channel descriptions. See [`ChannelLayout::roles`].
"#]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelLayout {
    tag: LayoutTag,
    bitmap: u32,
    descriptions: Vec<ChannelDescription>,
}

impl ChannelLayout {
    /// A layout described by its tag alone
    pub const fn from_tag(tag: LayoutTag) -> Self {
        Self {
            tag,
            bitmap: 0,
            descriptions: Vec::new(),
        }
    }

    /// A layout described by a WAVE speaker mask
    pub const fn from_bitmap(bitmap: u32) -> Self {
        Self {
            tag: LayoutTag::USE_CHANNEL_BITMAP,
            bitmap,
            descriptions: Vec::new(),
        }
    }

    /// A layout described channel by channel
    pub fn from_descriptions(descriptions: Vec<ChannelDescription>) -> Self {
        Self {
            tag: LayoutTag::USE_CHANNEL_DESCRIPTIONS,
            bitmap: 0,
            descriptions,
        }
    }

    /// Read the payload of a `chan` chunk ending at `end`.
    ///
    /// Descriptions stop at `end` even if the declared count asks for more.
    pub fn read<R: Read + Seek>(reader: &mut ByteReader<R>, end: u64) -> ReadResult<Self> {
        let tag = LayoutTag::new(reader.read_u32_be()?);
        let bitmap = reader.read_u32_be()?;
        let count = reader.read_u32_be()?;

        let room = end.saturating_sub(reader.position()) / DESCRIPTION_SIZE;
        if u64::from(count) > room {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Channel layout declares {} descriptions but the chunk holds {}",
                count,
                room
            );
        }
        let count = u64::from(count).min(room);
        let mut descriptions =
            Vec::with_capacity(count.min(reader.remaining() / DESCRIPTION_SIZE) as usize);
        for _ in 0..count {
            let label = reader.read_u32_be()?;
            let flags = reader.read_u32_be()?;
            let coordinates = [
                reader.read_f32_be()?,
                reader.read_f32_be()?,
                reader.read_f32_be()?,
            ];
            descriptions.push(ChannelDescription {
                label,
                flags,
                coordinates,
            });
        }

        Ok(Self {
            tag,
            bitmap,
            descriptions,
        })
    }

    /// The layout tag
    pub const fn tag(&self) -> LayoutTag {
        self.tag
    }

    /// The speaker mask, meaningful with [`LayoutTag::USE_CHANNEL_BITMAP`]
    pub const fn bitmap(&self) -> u32 {
        self.bitmap
    }

    /// The per-channel descriptions
    pub fn descriptions(&self) -> &[ChannelDescription] {
        &self.descriptions
    }

    #[doc = r#"
    The role of each channel, in file channel order.

    With channel descriptions, a label without a speaker position, or one that repeats an
    earlier channel's position, becomes the lowest [`ChannelRole::Discrete`] not otherwise
    taken. The result therefore never holds a role twice.
    "#]
    pub fn roles(&self) -> Vec<ChannelRole> {
        if let Some(roles) = self.tag.roles() {
            return roles;
        }
        if self.tag == LayoutTag::USE_CHANNEL_BITMAP {
            return BITMAP_ROLES
                .iter()
                .enumerate()
                .filter(|(bit, _)| self.bitmap & (1 << bit) != 0)
                .map(|(_, role)| *role)
                .collect();
        }
        self.description_roles()
    }

    fn description_roles(&self) -> Vec<ChannelRole> {
        let mut used = BTreeSet::new();
        let labelled: Vec<_> = self
            .descriptions
            .iter()
            .map(|d| role_for_label(d.label).filter(|role| used.insert(*role)))
            .collect();

        let mut next = 0u16;
        labelled
            .into_iter()
            .map(|role| {
                role.unwrap_or_else(|| {
                    while used.contains(&ChannelRole::Discrete(next)) {
                        next += 1;
                    }
                    let role = ChannelRole::Discrete(next);
                    used.insert(role);
                    role
                })
            })
            .collect()
    }

    /// The roles as an unordered set
    pub fn role_set(&self) -> ChannelRoleSet {
        self.roles().into_iter().collect()
    }

    /// Number of channels the layout describes
    pub fn num_channels(&self) -> usize {
        self.roles().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ChannelMap, MapResolution};
    use pretty_assertions::assert_eq;
    use ChannelRole::*;

    #[test]
    fn tag_layout_roles() {
        let layout = ChannelLayout::from_tag(LayoutTag::MPEG_5_1_C);
        assert_eq!(
            layout.roles(),
            vec![Left, Centre, Right, LeftSurround, RightSurround, Lfe]
        );
        assert_eq!(layout.role_set(), ChannelRoleSet::surround_5_1());
    }

    #[test]
    fn bitmap_roles() {
        // front left, front right, LFE, top front left
        let layout = ChannelLayout::from_bitmap(0b1_0000_0000_1011);
        assert_eq!(layout.roles(), vec![Left, Right, Lfe, TopFrontLeft]);
    }

    #[test]
    fn description_roles_fill_gaps_with_discrete() {
        let layout = ChannelLayout::from_descriptions(vec![
            ChannelDescription::with_label(2),
            ChannelDescription::with_label(0x1_0000),
            ChannelDescription::with_label(999),
            ChannelDescription::with_label(2),
            ChannelDescription::with_label(1),
        ]);
        assert_eq!(
            layout.roles(),
            vec![Right, Discrete(0), Discrete(1), Discrete(2), Left]
        );
        assert_eq!(layout.role_set().len(), 5);
    }

    #[test]
    fn reads_chan_payload() {
        let mut bytes = Vec::new();
        bytes.extend(0u32.to_be_bytes());
        bytes.extend(0u32.to_be_bytes());
        bytes.extend(2u32.to_be_bytes());
        for label in [3u32, 4] {
            bytes.extend(label.to_be_bytes());
            bytes.extend(0u32.to_be_bytes());
            bytes.extend([0; 12]);
        }
        let mut reader = ByteReader::from_byte_slice(&bytes);
        let layout = ChannelLayout::read(&mut reader, bytes.len() as u64).unwrap();
        assert_eq!(layout.tag(), LayoutTag::USE_CHANNEL_DESCRIPTIONS);
        assert_eq!(layout.roles(), vec![Centre, Lfe]);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn description_count_is_bounded_by_chunk_end() {
        let mut bytes = Vec::new();
        bytes.extend(0u32.to_be_bytes());
        bytes.extend(0u32.to_be_bytes());
        bytes.extend(2u32.to_be_bytes());
        bytes.extend(3u32.to_be_bytes());
        bytes.extend([0; 16]);
        let end = bytes.len() as u64;
        // the next chunk's header
        bytes.extend(b"data");
        bytes.extend(0i64.to_be_bytes());
        bytes.extend([0; 8]);

        let mut reader = ByteReader::from_byte_slice(&bytes);
        let layout = ChannelLayout::read(&mut reader, end).unwrap();
        assert_eq!(layout.roles(), vec![Centre]);
        assert_eq!(reader.position(), end);

        let map = ChannelMap::build(Some(&layout), 1);
        assert_eq!(map.resolution(), MapResolution::Layout);
    }

    #[test]
    fn truncated_chan_payload() {
        let bytes = [0u8; 8];
        let mut reader = ByteReader::from_byte_slice(&bytes);
        assert!(ChannelLayout::read(&mut reader, 8).unwrap_err().is_out_of_bounds());
    }
}
