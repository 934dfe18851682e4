//! Manifest layer: reading, class vocabulary, cleaning and partitioning.
//!
//! Architecture:
//! ```text
//!  FilesData.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ manifest  │  csv rows → Vec<RawRecord>
//!   └──────────┘
//!        │
//!        ├──────────────────┐
//!        ▼                  ▼
//!   ┌────────────┐    ┌──────────┐
//!   │ vocabulary  │──▶│  filter   │  drop short / unknown rows → Vec<SampleRecord>
//!   └────────────┘    └──────────┘
//!                           │
//!                           ▼
//!                     ┌──────────┐
//!                     │  split    │  "Train" tag → (train, test)
//!                     └──────────┘
//! ```

pub mod filter;
pub mod manifest;
pub mod model;
pub mod split;
pub mod vocabulary;
