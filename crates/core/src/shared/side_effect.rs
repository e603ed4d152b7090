/// Outcome of a best-effort step that runs after the primary operation
/// already succeeded. A failure here never fails the primary operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect<T> {
    Applied(T),
    /// The step did not apply, e.g. the plant has no species to schedule against
    NotApplicable,
    Failed(String),
}

impl<T> SideEffect<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(val) => Some(val),
            _ => None,
        }
    }

    pub fn as_applied(&self) -> Option<&T> {
        match self {
            Self::Applied(val) => Some(val),
            _ => None,
        }
    }
}
