//! Sign pipeline: frames in, text and events out.
//!
//! [`SignPipeline`] owns the aggregator, the sentence builder and the
//! text-to-sign translator, and publishes [`PipelineEvent`]s to any number
//! of [`EventSink`]s.

pub mod orchestrator;
pub mod sink;
pub mod types;

pub use orchestrator::{PipelineConfig, SignPipeline};
pub use sink::{ChannelSink, CollectorSink, EventSink, FnSink};
pub use types::{PipelineEvent, PipelineMode, PipelineState, PipelineStatistics, TranslationMode};
