/// Host lifecycle notifications the preference layer reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// App came back to the foreground
    Resumed,
    /// App went to the background
    Suspended,
}
