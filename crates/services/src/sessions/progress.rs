/// Position within an active session, useful for progress bars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    /// One-based number of the question on screen; 0 outside an active run.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub is_complete: bool,
}
