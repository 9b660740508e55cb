pub mod assembler;
pub mod audio;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod images;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use assembler::SectionAssembler;
pub use audio::AudioSources;
pub use config::{HighwayCodeConfig, HighwayCodeConfigBuilder, StoreConfig};
pub use db::create_pool;
pub use error::{HighwayCodeError, Result};
pub use images::{FsImageProbe, ImageProbe};
pub use memory::{Dataset, MemoryStore};
pub use models::{ImageMetadata, Rule, Section, SectionNumber, SectionView};
pub use postgres::PgStore;
pub use store::HighwayCodeStore;
