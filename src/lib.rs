#![doc = r#"
Metadata and channel layouts from Core Audio Format files

# Overview

`cafmeta` walks the chunks of a CAF file without decoding its audio and recovers:

- the key/value strings of `info` chunks and metadata `uuid` chunks;
- tempo, time signature and key signature from an embedded Standard MIDI File;
- a [`StreamDescription`](stream::StreamDescription) of the audio itself;
- a [`ChannelMap`](layout::ChannelMap) that puts the file's channels into a canonical
  speaker order.

Every walk is non-destructive: the stream is handed back where it was found.

# Example
```rust
# use std::io::Cursor;
use cafmeta::{caf, layout::{ChannelLayout, ChannelMap, LayoutTag}};

let mut bytes = b"caff\0\x01\0\0".to_vec();
bytes.extend(b"info");
bytes.extend(20i64.to_be_bytes());
bytes.extend(1u32.to_be_bytes());
bytes.extend(b"artist\0Someone\0");
bytes.push(0);

let scan = caf::scan(&mut Cursor::new(bytes)).unwrap();
assert_eq!(scan.metadata.get("artist"), Some("Someone"));

let layout = ChannelLayout::from_tag(LayoutTag::MPEG_3_0_B);
let map = ChannelMap::build(Some(&layout), 3);
assert_eq!(map.as_slice(), &[2, 0, 1]);
```

# Features

- `tracing` (default): log skipped chunks, truncated files and unparseable MIDI data.
- `serde`: `Serialize` and `Deserialize` for the data types.
"#]
#![warn(missing_docs)]

mod error;
pub use error::*;

pub mod caf;
pub mod layout;
pub mod metadata;
pub mod midi;
pub mod reader;
pub mod stream;

#[doc = r#"
Common imports
"#]
pub mod prelude {
    pub use crate::{
        caf::{Scan, ScanOptions, scan, scan_with},
        error::*,
        layout::{ChannelLayout, ChannelMap, ChannelRole, ChannelRoleSet, LayoutTag},
        metadata::MetadataMap,
        stream::{AudioReader, AudioWriter, SampleCodec, SampleSink, StreamDescription, describe},
    };
}
