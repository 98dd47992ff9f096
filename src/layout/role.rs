use std::collections::BTreeSet;

#[doc = r#"
An abstract speaker position, independent of any vendor's channel numbering.

The declaration order is the canonical order: a [`ChannelRoleSet`] always lists
its roles in this order, so the index of a role inside a set is well defined.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelRole {
    /// L
    Left,
    /// R
    Right,
    /// C
    Centre,
    /// LFE
    Lfe,
    /// Ls
    LeftSurround,
    /// Rs
    RightSurround,
    /// Lc
    LeftCentre,
    /// Rc
    RightCentre,
    /// Cs
    CentreSurround,
    /// Lss
    LeftSurroundSide,
    /// Rss
    RightSurroundSide,
    /// Tm, the top centre surround
    TopMiddle,
    /// Tfl
    TopFrontLeft,
    /// Tfc
    TopFrontCentre,
    /// Tfr
    TopFrontRight,
    /// Trl
    TopRearLeft,
    /// Trc
    TopRearCentre,
    /// Trr
    TopRearRight,
    /// LFE2
    Lfe2,
    /// Lsr
    LeftSurroundRear,
    /// Rsr
    RightSurroundRear,
    /// Wl
    WideLeft,
    /// Wr
    WideRight,
    /// Tsl
    TopSideLeft,
    /// Tsr
    TopSideRight,
    /// Bfl
    BottomFrontLeft,
    /// Bfc
    BottomFrontCentre,
    /// Bfr
    BottomFrontRight,
    /// Proximity left
    ProximityLeft,
    /// Proximity right
    ProximityRight,
    /// Bsl
    BottomSideLeft,
    /// Bsr
    BottomSideRight,
    /// Brl
    BottomRearLeft,
    /// Brc
    BottomRearCentre,
    /// Brr
    BottomRearRight,
    /// Ambisonic component, by ACN index
    Ambisonic(u16),
    /// A channel with no speaker position
    Discrete(u16),
}

impl ChannelRole {
    /// True for [`ChannelRole::Discrete`]
    pub const fn is_discrete(&self) -> bool {
        matches!(self, Self::Discrete(_))
    }

    /// True for [`ChannelRole::Ambisonic`]
    pub const fn is_ambisonic(&self) -> bool {
        matches!(self, Self::Ambisonic(_))
    }
}

#[doc = r#"
An unordered set of [`ChannelRole`]s.

Iteration and [`index_of`](ChannelRoleSet::index_of) follow the canonical role
order, whatever order the roles were inserted in.
"#]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelRoleSet {
    roles: BTreeSet<ChannelRole>,
}

impl ChannelRoleSet {
    /// An empty set
    pub const fn new() -> Self {
        Self {
            roles: BTreeSet::new(),
        }
    }

    /// Add a role. Returns false if it was already present.
    pub fn insert(&mut self, role: ChannelRole) -> bool {
        self.roles.insert(role)
    }

    /// True if the role is in the set
    pub fn contains(&self, role: ChannelRole) -> bool {
        self.roles.contains(&role)
    }

    /// Number of roles
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// True if there are no roles
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Roles in canonical order
    pub fn iter(&self) -> impl Iterator<Item = ChannelRole> + '_ {
        self.roles.iter().copied()
    }

    /// Position of `role` in canonical order
    pub fn index_of(&self, role: ChannelRole) -> Option<usize> {
        if !self.roles.contains(&role) {
            return None;
        }
        Some(self.roles.range(..role).count())
    }

    /// True if every role is [`ChannelRole::Discrete`]
    pub fn is_discrete(&self) -> bool {
        !self.is_empty() && self.roles.iter().all(ChannelRole::is_discrete)
    }

    /// The order of a complete ambisonic set, i.e. `ACN 0..(order + 1)²` and nothing else.
    pub fn ambisonic_order(&self) -> Option<usize> {
        let order = ambisonic_order_for(self.len())?;
        let complete = self
            .roles
            .iter()
            .enumerate()
            .all(|(i, role)| *role == ChannelRole::Ambisonic(i as u16));
        complete.then_some(order)
    }

    /// `Discrete(0..count)`
    pub fn discrete(count: usize) -> Self {
        (0..count).map(|n| ChannelRole::Discrete(n as u16)).collect()
    }

    /// `Ambisonic(0..(order + 1)²)`
    pub fn ambisonic(order: usize) -> Self {
        let count = (order + 1) * (order + 1);
        (0..count).map(|n| ChannelRole::Ambisonic(n as u16)).collect()
    }

    /// C
    pub fn mono() -> Self {
        Self::from([ChannelRole::Centre])
    }

    /// L R
    pub fn stereo() -> Self {
        Self::from([ChannelRole::Left, ChannelRole::Right])
    }

    /// L R C
    pub fn lcr() -> Self {
        use ChannelRole::*;
        Self::from([Left, Right, Centre])
    }

    /// L R Cs
    pub fn lrs() -> Self {
        use ChannelRole::*;
        Self::from([Left, Right, CentreSurround])
    }

    /// L R C Cs
    pub fn lcrs() -> Self {
        use ChannelRole::*;
        Self::from([Left, Right, Centre, CentreSurround])
    }

    /// L R C Ls Rs
    pub fn surround_5_0() -> Self {
        use ChannelRole::*;
        Self::from([Left, Right, Centre, LeftSurround, RightSurround])
    }

    /// L R C LFE Ls Rs
    pub fn surround_5_1() -> Self {
        use ChannelRole::*;
        Self::from([Left, Right, Centre, Lfe, LeftSurround, RightSurround])
    }

    /// L R C Ls Rs Cs
    pub fn surround_6_0() -> Self {
        use ChannelRole::*;
        Self::from([Left, Right, Centre, LeftSurround, RightSurround, CentreSurround])
    }

    /// L R C LFE Ls Rs Cs
    pub fn surround_6_1() -> Self {
        use ChannelRole::*;
        Self::from([Left, Right, Centre, Lfe, LeftSurround, RightSurround, CentreSurround])
    }

    /// L R Ls Rs Lss Rss
    pub fn surround_6_0_music() -> Self {
        use ChannelRole::*;
        Self::from([
            Left,
            Right,
            LeftSurround,
            RightSurround,
            LeftSurroundSide,
            RightSurroundSide,
        ])
    }

    /// L R LFE Ls Rs Lss Rss
    pub fn surround_6_1_music() -> Self {
        use ChannelRole::*;
        Self::from([
            Left,
            Right,
            Lfe,
            LeftSurround,
            RightSurround,
            LeftSurroundSide,
            RightSurroundSide,
        ])
    }

    /// L R C Lss Rss Lsr Rsr
    pub fn surround_7_0() -> Self {
        use ChannelRole::*;
        Self::from([
            Left,
            Right,
            Centre,
            LeftSurroundSide,
            RightSurroundSide,
            LeftSurroundRear,
            RightSurroundRear,
        ])
    }

    /// L R C Ls Rs Lc Rc
    pub fn surround_7_0_sdds() -> Self {
        use ChannelRole::*;
        Self::from([
            Left,
            Right,
            Centre,
            LeftSurround,
            RightSurround,
            LeftCentre,
            RightCentre,
        ])
    }

    /// L R C LFE Lss Rss Lsr Rsr
    pub fn surround_7_1() -> Self {
        let mut set = Self::surround_7_0();
        set.insert(ChannelRole::Lfe);
        set
    }

    /// L R C LFE Ls Rs Lc Rc
    pub fn surround_7_1_sdds() -> Self {
        let mut set = Self::surround_7_0_sdds();
        set.insert(ChannelRole::Lfe);
        set
    }

    /// L R Ls Rs
    pub fn quadraphonic() -> Self {
        use ChannelRole::*;
        Self::from([Left, Right, LeftSurround, RightSurround])
    }

    /// L R C Lsr Rsr
    pub fn pentagonal() -> Self {
        use ChannelRole::*;
        Self::from([Left, Right, Centre, LeftSurroundRear, RightSurroundRear])
    }

    /// L R C Cs Lsr Rsr
    pub fn hexagonal() -> Self {
        use ChannelRole::*;
        Self::from([
            Left,
            Right,
            Centre,
            CentreSurround,
            LeftSurroundRear,
            RightSurroundRear,
        ])
    }

    /// L R C Cs Ls Rs Wl Wr
    pub fn octagonal() -> Self {
        use ChannelRole::*;
        Self::from([
            Left,
            Right,
            Centre,
            CentreSurround,
            LeftSurround,
            RightSurround,
            WideLeft,
            WideRight,
        ])
    }
}

/// `Some(order)` if `count` is `(order + 1)²`.
pub(crate) fn ambisonic_order_for(count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let root = (count as f64).sqrt().round() as usize;
    (root * root == count).then(|| root - 1)
}

impl FromIterator<ChannelRole> for ChannelRoleSet {
    fn from_iter<T: IntoIterator<Item = ChannelRole>>(iter: T) -> Self {
        Self {
            roles: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[ChannelRole; N]> for ChannelRoleSet {
    fn from(roles: [ChannelRole; N]) -> Self {
        roles.into_iter().collect()
    }
}

impl From<&[ChannelRole]> for ChannelRoleSet {
    fn from(roles: &[ChannelRole]) -> Self {
        roles.iter().copied().collect()
    }
}

#[test]
fn index_follows_canonical_order() {
    use ChannelRole::*;
    let set = ChannelRoleSet::from([RightSurround, Centre, Left, Lfe, Right, LeftSurround]);
    let order: Vec<_> = set.iter().collect();
    assert_eq!(order, vec![Left, Right, Centre, Lfe, LeftSurround, RightSurround]);
    assert_eq!(set.index_of(Lfe), Some(3));
    assert_eq!(set.index_of(RightSurround), Some(5));
    assert_eq!(set.index_of(CentreSurround), None);
}

#[test]
fn ambisonic_sets() {
    assert_eq!(ChannelRoleSet::ambisonic(0).len(), 1);
    assert_eq!(ChannelRoleSet::ambisonic(3).len(), 16);
    assert_eq!(ChannelRoleSet::ambisonic(2).ambisonic_order(), Some(2));

    let incomplete = ChannelRoleSet::from([ChannelRole::Ambisonic(1), ChannelRole::Ambisonic(3)]);
    assert_eq!(incomplete.ambisonic_order(), None);
    assert_eq!(ChannelRoleSet::stereo().ambisonic_order(), None);
}

#[test]
fn perfect_squares() {
    assert_eq!(ambisonic_order_for(1), Some(0));
    assert_eq!(ambisonic_order_for(4), Some(1));
    assert_eq!(ambisonic_order_for(36), Some(5));
    assert_eq!(ambisonic_order_for(5), None);
    assert_eq!(ambisonic_order_for(0), None);
}
