//! User intents dispatched into the model

/// Everything the UI can ask the core to do
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    StartScan,
    StopScan,
    Reset,
    ManualSubmit(String),
    ClearHistory,
    Play(usize),
    TogglePlayback,
    Pause,
    Resume,
    Next,
    Previous,
    /// Absolute position as a fraction of the current track
    Seek(f64),
    /// Relative move in seconds
    SeekBy(f64),
    ToggleLike(u32),
    SwitchPanel,
    Quit,
}
