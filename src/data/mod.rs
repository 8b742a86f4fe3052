/// Data layer: core types, parsing, the column transform and serialization.
///
/// Architecture:
/// ```text
///   InputFile (name + CSV bytes)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse bytes → Table
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ transform  │  drop *_Confidence, round *_X/_Y/_Z
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  Table → CSV bytes
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod transform;
pub mod writer;
