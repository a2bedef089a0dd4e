#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SessionState {
    Created,   // Built but no timers or subscriptions yet
    Mounted,   // Timers running, sections observed
    Unmounted, // Everything released
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum AutoScrollState {
    HoldTop,    // Showing the hero before moving
    Scrolling,  // Moving down at a constant speed
    HoldBottom, // Resting on the contact section
    Finished,   // Recording can stop
}
