/// Per-entity show/hide flag. Hidden parents hide their whole subtree.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Visibility {
    pub visible: bool,
}

impl Visibility {
    pub fn visible() -> Self {
        Self { visible: true }
    }

    pub fn hidden() -> Self {
        Self { visible: false }
    }

    pub fn toggled(self) -> Self {
        Self {
            visible: !self.visible,
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::visible()
    }
}

impl From<bool> for Visibility {
    fn from(visible: bool) -> Self {
        Self { visible }
    }
}

#[cfg(test)]
mod tests {
    use super::Visibility;

    #[test]
    fn toggle_flips_and_default_is_visible() {
        assert!(Visibility::default().visible);
        assert_eq!(Visibility::visible().toggled(), Visibility::hidden());
        assert_eq!(Visibility::from(false).toggled(), Visibility::visible());
    }
}
