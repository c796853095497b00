/// Result of an asynchronous asset load, polled by the frame loop.
///
/// Consumers must only touch the asset through [`LoadState::loaded`] (or a
/// match on `Loaded`), so nothing is dereferenced before the load completes.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Pending,
    Loaded(T),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Pending
    }
}

impl<T> LoadState<T> {
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => LoadState::Loaded(v),
            Err(e) => LoadState::Failed(e.to_string()),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(v) => Some(v),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            LoadState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LoadState;

    #[test]
    fn default_is_pending() {
        let s: LoadState<u32> = LoadState::default();
        assert!(s.is_pending());
        assert_eq!(s.loaded(), None);
    }

    #[test]
    fn from_result_keeps_error_text() {
        let s: LoadState<u32> = LoadState::from_result(Err::<u32, _>("404 Not Found"));
        assert_eq!(s.failure(), Some("404 Not Found"));
        assert!(!s.is_loaded());
    }
}
