use cafmeta::layout::{
    ChannelLayout, ChannelMap, ChannelRoleSet, KNOWN_LAYOUTS, LayoutTag, MapResolution,
};
use std::collections::HashSet;

#[test]
fn role_count_matches_tag() {
    for layout in KNOWN_LAYOUTS {
        assert_eq!(
            layout.roles.len(),
            layout.tag.channel_count(),
            "{} declares the wrong number of roles",
            layout.name
        );
    }
}

#[test]
fn no_role_appears_twice() {
    for layout in KNOWN_LAYOUTS {
        let unique: HashSet<_> = layout.roles.iter().collect();
        assert_eq!(unique.len(), layout.roles.len(), "{} repeats a role", layout.name);
    }
}

#[test]
fn known_layouts_name_their_speakers() {
    for layout in KNOWN_LAYOUTS {
        assert!(!layout.role_set().is_discrete(), "{} is all discrete", layout.name);
    }
}

#[test]
fn tags_are_unique() {
    let mut seen = HashSet::new();
    for layout in KNOWN_LAYOUTS {
        assert!(seen.insert(layout.tag), "{} appears twice", layout.name);
    }
}

#[test]
fn documented_equivalents_round_trip() {
    let documented: Vec<_> = KNOWN_LAYOUTS
        .iter()
        .filter_map(|l| l.equivalent.map(|equivalent| (l, equivalent())))
        .collect();
    assert!(!documented.is_empty());

    for (layout, equivalent) in documented {
        assert_eq!(layout.role_set(), equivalent, "{}", layout.name);
        assert_eq!(
            LayoutTag::for_role_set(&equivalent),
            layout.tag,
            "{} does not round trip",
            layout.name
        );
    }
}

#[test]
fn every_role_set_finds_a_tag_with_the_same_roles() {
    for layout in KNOWN_LAYOUTS {
        let set = layout.role_set();
        let tag = LayoutTag::for_role_set(&set);
        let roles = tag.roles().unwrap_or_default();
        assert_eq!(ChannelRoleSet::from_iter(roles), set, "{}", layout.name);
    }
}

#[test]
fn ambisonic_orders_round_trip() {
    for order in 0..=5 {
        let set = ChannelRoleSet::ambisonic(order);
        let tag = LayoutTag::for_role_set(&set);
        assert_eq!(tag, LayoutTag::HOA_ACN_SN3D.with_channels(set.len() as u16));
        assert_eq!(tag.roles().map(ChannelRoleSet::from_iter), Some(set.clone()));
        assert_eq!(set.ambisonic_order(), Some(order));
    }
}

#[test]
fn discrete_sets_map_to_discrete_in_order() {
    let set = ChannelRoleSet::discrete(5);
    let tag = LayoutTag::for_role_set(&set);
    assert_eq!(tag, LayoutTag::DISCRETE_IN_ORDER.with_channels(5));
    assert_eq!(tag.roles().map(ChannelRoleSet::from_iter), Some(set));
}

#[test]
fn every_known_layout_maps_every_channel() {
    for layout in KNOWN_LAYOUTS {
        let count = layout.tag.channel_count();
        let map = ChannelMap::build(Some(&ChannelLayout::from_tag(layout.tag)), count);
        assert_eq!(map.resolution(), MapResolution::Layout, "{}", layout.name);

        let mut slots = map.as_slice().to_vec();
        slots.sort_unstable();
        assert_eq!(slots, (0..count).collect::<Vec<_>>(), "{}", layout.name);
    }
}

#[test]
fn missing_layout_is_identity() {
    for count in 1..=64 {
        let map = ChannelMap::build(None, count);
        assert_eq!(map.as_slice(), (0..count).collect::<Vec<_>>().as_slice());
    }
}

#[test]
fn mismatched_layout_degrades() {
    let layout = ChannelLayout::from_tag(LayoutTag::MPEG_5_1_A);
    for count in [1, 2, 5, 7, 8] {
        let map = ChannelMap::build(Some(&layout), count);
        assert_eq!(map.resolution(), MapResolution::Degraded);
        assert_eq!(map.len(), count);
    }
}
