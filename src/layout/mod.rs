#![doc = r#"
Reconciling Core Audio channel layouts with an order-independent role model

# Overview

A CAF file may declare, in its `chan` chunk, which speaker each channel feeds. The
declaration comes in one of three forms (a layout tag, a WAVE speaker mask, or a
label per channel), and the channel order it implies is the vendor's, not ours.

This module turns any of those into:

- the file's per-channel [`ChannelRole`]s, in file order ([`ChannelLayout::roles`])
- the unordered [`ChannelRoleSet`] they form, whose canonical order is the target order
- a [`ChannelMap`] from file channel index to canonical slot

The tag table ([`KNOWN_LAYOUTS`]) is closed and static, and every entry is checked by
the test suite: the role count matches the tag's channel count, no role repeats, and
tags with a well known role set are recovered from that set by
[`LayoutTag::for_role_set`].
"#]

mod descriptor;
pub use descriptor::*;

mod label;
pub use label::*;

mod map;
pub use map::*;

mod role;
pub use role::{ChannelRole, ChannelRoleSet};

mod tag;
pub use tag::*;
