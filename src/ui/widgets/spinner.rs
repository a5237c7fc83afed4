/// Frames of the loading spinner, advanced once per tick.
///
pub const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Return the spinner frame for the given index.
///
pub fn frame(index: usize) -> &'static str {
    FRAMES[index % FRAMES.len()]
}
