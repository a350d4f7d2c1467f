//! Targeted delivery: a routing path names a sequence of container regions
//! an event should be delivered through, skipping every other subtree.

/// A path of child indices from the layout root down to a target widget.
/// Containers consult [`RoutingPath::head`] to decide which child to
/// recurse into and [`RoutingPath::descend`] to build the remaining path
/// for that child; every other child is skipped entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPath(Vec<usize>);

impl RoutingPath {
    pub fn new(segments: Vec<usize>) -> Self {
        Self(segments)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The child index to recurse into at the current level, if any
    /// segments remain.
    pub fn head(&self) -> Option<usize> {
        self.0.first().copied()
    }

    /// The path to hand to the child named by `head()`.
    pub fn descend(&self) -> RoutingPath {
        RoutingPath(self.0.iter().skip(1).copied().collect())
    }
}

/// Whether a traversal is targeted (only blocks on a routing path are
/// entered) or a background delivery to the whole tree.
#[derive(Debug, Clone)]
pub enum Delivery {
    Background,
    Targeted(RoutingPath),
}

impl Delivery {
    /// For a targeted delivery, should the child at `index` be entered?
    /// Background deliveries always enter every child.
    pub fn enters_child(&self, index: usize) -> bool {
        match self {
            Delivery::Background => true,
            Delivery::Targeted(path) => path.head() == Some(index),
        }
    }

    /// The delivery a container should pass down to the child at `index`.
    pub fn for_child(&self, index: usize) -> Delivery {
        match self {
            Delivery::Background => Delivery::Background,
            Delivery::Targeted(path) => {
                debug_assert_eq!(path.head(), Some(index));
                Delivery::Targeted(path.descend())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targeted_delivery_enters_only_the_path_child() {
        let d = Delivery::Targeted(RoutingPath::new(vec![2, 0]));
        assert!(!d.enters_child(0));
        assert!(!d.enters_child(1));
        assert!(d.enters_child(2));
        let next = d.for_child(2);
        assert!(next.enters_child(0));
        assert!(!next.enters_child(1));
    }

    #[test]
    fn background_delivery_enters_every_child() {
        let d = Delivery::Background;
        assert!(d.enters_child(0));
        assert!(d.enters_child(99));
    }
}
