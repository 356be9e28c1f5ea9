use crate::pipeline::types::PipelineEvent;
use std::sync::{Arc, Mutex};

/// Pluggable receiver for pipeline events.
///
/// Called synchronously, in order, from inside the pipeline call that
/// produced the event. Implementations should return quickly.
pub trait EventSink: Send {
    fn handle(&mut self, event: &PipelineEvent) -> crate::error::Result<()>;

    /// Name for logging.
    fn name(&self) -> &'static str {
        "sink"
    }
}

/// Keeps every event in a shared buffer.
///
/// Clones share the buffer, so a test can keep one handle and give the
/// pipeline another.
#[derive(Debug, Clone, Default)]
pub struct CollectorSink {
    events: Arc<Mutex<Vec<PipelineEvent>>>,
}

impl CollectorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything received so far.
    pub fn events(&self) -> Vec<PipelineEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Texts of every `TextUpdated` event, in order.
    pub fn texts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PipelineEvent::TextUpdated { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for CollectorSink {
    fn handle(&mut self, event: &PipelineEvent) -> crate::error::Result<()> {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}

/// Forwards events to a channel without blocking.
///
/// A full or disconnected channel drops the event.
pub struct ChannelSink {
    tx: crossbeam_channel::Sender<PipelineEvent>,
}

impl ChannelSink {
    pub fn new(tx: crossbeam_channel::Sender<PipelineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn handle(&mut self, event: &PipelineEvent) -> crate::error::Result<()> {
        if self.tx.try_send(event.clone()).is_err() {
            tracing::trace!("Event channel full or closed, dropping event");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "channel"
    }
}

/// Adapts a closure into an [`EventSink`].
pub struct FnSink<F>(pub F);

impl<F> EventSink for FnSink<F>
where
    F: FnMut(&PipelineEvent) + Send,
{
    fn handle(&mut self, event: &PipelineEvent) -> crate::error::Result<()> {
        (self.0)(event);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "callback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::PipelineMode;

    fn state_event() -> PipelineEvent {
        PipelineEvent::StateChanged {
            mode: PipelineMode::Idle,
            is_processing: false,
        }
    }

    #[test]
    fn test_event_sink_is_object_safe() {
        let _sink: Box<dyn EventSink> = Box::new(CollectorSink::new());
    }

    #[test]
    fn test_collector_clones_share_events() {
        let collector = CollectorSink::new();
        let mut handle = collector.clone();
        handle.handle(&state_event()).unwrap();
        handle
            .handle(&PipelineEvent::TextUpdated {
                text: "Hi".to_string(),
                preview: "Hi".to_string(),
            })
            .unwrap();

        assert_eq!(collector.events().len(), 2);
        assert_eq!(collector.texts(), ["Hi"]);
    }

    #[test]
    fn test_channel_sink_drops_when_full() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let mut sink = ChannelSink::new(tx);
        sink.handle(&state_event()).unwrap();
        sink.handle(&state_event()).unwrap();
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn test_fn_sink_calls_closure() {
        let mut count = 0;
        {
            let mut sink = FnSink(|_: &PipelineEvent| count += 1);
            sink.handle(&state_event()).unwrap();
        }
        assert_eq!(count, 1);
    }
}
