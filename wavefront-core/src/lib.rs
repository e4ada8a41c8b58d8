pub mod alignment;
pub mod config;
pub mod deconvolve;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod reference;
pub mod resample;
pub mod room_modes;
pub mod signals;
pub mod smoothing;
pub mod spectrum;
pub mod windowing;

pub use config::Config;
pub use error::{AnalysisError, ConfigError};
pub use pipeline::{analyze, AnalysisResult, FrequencyPoint, Recording};
pub use reference::{CatalogueEntry, ReferenceRegistry, ReferenceSignal};
pub use room_modes::RoomDimensions;
