/// Receives a notification whenever a color it holds changes appearance.
///
/// Colors keep only a [`Weak`](std::rc::Weak) reference to their owner; a
/// dropped owner simply stops being notified.
pub trait StyleOwner {
    fn style_changed(&self);
}
