use super::ChannelLayout;
use crate::LayoutError;

/// How a [`ChannelMap`] came about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapResolution {
    /// No layout was declared
    Identity,
    /// Every channel was placed by its role
    Layout,
    /// The layout's role count disagreed with the channel count, so channels stay in file order
    Degraded,
}

#[doc = r#"
A permutation from file channel order to canonical role order.

Entry `i` is the destination slot for file channel `i`. Every entry is below the
channel count the map was built for.

# Example
```rust
# use cafmeta::layout::{ChannelLayout, ChannelMap, LayoutTag};
// C L R Ls Rs LFE, delivered as L R C LFE Ls Rs
let layout = ChannelLayout::from_tag(LayoutTag::MPEG_5_1_D);
let map = ChannelMap::build(Some(&layout), 6);
assert_eq!(map.as_slice(), &[2, 0, 1, 4, 5, 3]);
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelMap {
    map: Vec<usize>,
    resolution: MapResolution,
}

impl ChannelMap {
    /// `i -> i` for every channel
    pub fn identity(num_channels: usize) -> Self {
        Self {
            map: (0..num_channels).collect(),
            resolution: MapResolution::Identity,
        }
    }

    #[doc = r#"
    Build the map for a stream with `num_channels` channels and an optional declared layout.

    If the layout's role count differs from `num_channels`, the map is
    [`MapResolution::Degraded`]: channels keep file order and the consumer zero-fills
    whatever the file does not provide.

    # Errors
    [`LayoutError::RoleNotFound`] if a declared role is missing from the layout's own
    role set. That can only happen if the role tables contradict themselves.
    "#]
    pub fn try_build(
        layout: Option<&ChannelLayout>,
        num_channels: usize,
    ) -> Result<Self, LayoutError> {
        let Some(layout) = layout else {
            return Ok(Self::identity(num_channels));
        };

        let order = layout.roles();
        let set = layout.role_set();
        if set.len() != num_channels {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Channel layout {} describes {} channels but the stream has {}",
                layout.tag(),
                set.len(),
                num_channels
            );
            return Ok(Self {
                map: (0..num_channels).collect(),
                resolution: MapResolution::Degraded,
            });
        }

        let map = order
            .iter()
            .enumerate()
            .map(|(channel, role)| {
                set.index_of(*role).ok_or(LayoutError::RoleNotFound {
                    channel,
                    role: *role,
                    tag: layout.tag(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            map,
            resolution: MapResolution::Layout,
        })
    }

    /// Like [`ChannelMap::try_build`], but logs a failure and falls back to the identity map.
    pub fn build(layout: Option<&ChannelLayout>, num_channels: usize) -> Self {
        match Self::try_build(layout, num_channels) {
            Ok(map) => map,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::error!("Channel map construction failed: {}", _e);
                Self::identity(num_channels)
            }
        }
    }

    /// Destination slot for file channel `channel`
    pub fn get(&self, channel: usize) -> Option<usize> {
        self.map.get(channel).copied()
    }

    /// The whole table
    pub fn as_slice(&self) -> &[usize] {
        &self.map
    }

    /// Number of file channels
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True for a zero-channel stream
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// How the map was resolved
    pub const fn resolution(&self) -> MapResolution {
        self.resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ChannelDescription, LayoutTag};
    use pretty_assertions::assert_eq;

    #[test]
    fn no_layout_is_identity() {
        for n in 1..=32 {
            let map = ChannelMap::build(None, n);
            assert_eq!(map.as_slice(), (0..n).collect::<Vec<_>>().as_slice());
            assert_eq!(map.resolution(), MapResolution::Identity);
        }
    }

    #[test]
    fn b_format_reorders_to_acn() {
        let layout = ChannelLayout::from_tag(LayoutTag::AMBISONIC_B_FORMAT);
        let map = ChannelMap::try_build(Some(&layout), 4).unwrap();
        assert_eq!(map.as_slice(), &[0, 3, 1, 2]);
        assert_eq!(map.resolution(), MapResolution::Layout);
    }

    #[test]
    fn count_mismatch_degrades() {
        let layout = ChannelLayout::from_tag(LayoutTag::STEREO);
        let map = ChannelMap::try_build(Some(&layout), 3).unwrap();
        assert_eq!(map.as_slice(), &[0, 1, 2]);
        assert_eq!(map.resolution(), MapResolution::Degraded);
    }

    #[test]
    fn descriptions_map_by_role() {
        let layout = ChannelLayout::from_descriptions(vec![
            ChannelDescription::with_label(3),
            ChannelDescription::with_label(2),
            ChannelDescription::with_label(1),
        ]);
        let map = ChannelMap::build(Some(&layout), 3);
        // canonical order is L R C
        assert_eq!(map.as_slice(), &[2, 1, 0]);
    }

    #[test]
    fn every_known_layout_builds_a_permutation() {
        for known in crate::layout::KNOWN_LAYOUTS {
            let n = known.tag.channel_count();
            let layout = ChannelLayout::from_tag(known.tag);
            let map = ChannelMap::try_build(Some(&layout), n).unwrap();
            let mut sorted = map.as_slice().to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..n).collect::<Vec<_>>(), "{}", known.name);
        }
    }
}
