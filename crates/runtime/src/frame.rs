/// Display-refresh counter.
///
/// Animation advances per frame, never per second, so a run is the same on
/// every host regardless of refresh rate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
}

impl Frame {
    pub fn first() -> Self {
        Self::default()
    }

    pub fn next(self) -> Self {
        Self {
            index: self.index + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;

    #[test]
    fn next_advances_index() {
        let f = Frame::first().next().next();
        assert_eq!(f.index, 2);
        assert!(f > Frame::first());
    }
}
