use crate::render::WorkflowView;

/// Receives display updates while a turn streams in
///
/// Called synchronously from the event loop, once per state change.
pub trait TurnObserver {
    /// The workflow panel was re-rendered
    fn workflow_updated(&mut self, view: &WorkflowView);

    /// Full answer text assembled so far (not just the new fragment)
    fn answer_updated(&mut self, text: &str);
}

/// Observer that ignores every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TurnObserver for NoopObserver {
    fn workflow_updated(&mut self, _view: &WorkflowView) {}

    fn answer_updated(&mut self, _text: &str) {}
}
