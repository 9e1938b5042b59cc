use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};

/// Read-only snapshot of a node's children for inspection and debugging.
/// Has no effect on the search itself.
pub struct NodeDetails<A> {
    pub visits: usize,
    pub children: Vec<(A, ChildDetails)>,
}

impl<A: Display> Display for NodeDetails<A> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let actions = format!(
            "[{}]",
            self.children
                .iter()
                .fold(String::new(), |acc, (a, details)| acc
                    + &format!("\n\t(A: {}, {}),", a, details))
        );

        write!(
            f,
            "V: {visits}, Actions: {actions}",
            visits = self.visits,
            actions = actions
        )
    }
}

impl<A: Debug + Display> Debug for NodeDetails<A> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(self, f)
    }
}

#[derive(Clone, PartialEq)]
pub struct ChildDetails {
    pub visits: usize,
    pub mean_value: f32,
    pub depth: usize,
}

impl Display for ChildDetails {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "N: {visits}, Q: {mean_value:.3}, D: {depth}",
            visits = self.visits,
            mean_value = self.mean_value,
            depth = self.depth,
        )
    }
}

impl Debug for ChildDetails {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Ord for ChildDetails {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.visits, &self.mean_value).partial_cmp(&(other.visits, &other.mean_value)) {
            Some(ordering) => ordering,
            None => {
                panic!(
                    "Could not compare: {:?} to {:?}",
                    (self.visits, &self.mean_value),
                    (other.visits, &other.mean_value)
                );
            }
        }
    }
}

impl PartialOrd for ChildDetails {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for ChildDetails {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_child_details_ordering_visits() {
        let greater = ChildDetails {
            visits: 2,
            mean_value: 0.1,
            depth: 1,
        };

        let less = ChildDetails {
            visits: 1,
            mean_value: 0.9,
            depth: 1,
        };

        assert_eq!(less.cmp(&greater), Ordering::Less);
        assert_eq!(greater.cmp(&less), Ordering::Greater);
    }

    #[test]
    fn test_child_details_ordering_mean_value() {
        let greater = ChildDetails {
            visits: 3,
            mean_value: 0.8,
            depth: 1,
        };

        let less = ChildDetails {
            visits: 3,
            mean_value: 0.2,
            depth: 1,
        };

        assert_eq!(less.cmp(&greater), Ordering::Less);
        assert_eq!(greater.cmp(&less), Ordering::Greater);
    }

    #[test]
    fn test_child_details_display() {
        let details = ChildDetails {
            visits: 12,
            mean_value: 0.5,
            depth: 3,
        };

        assert_eq!(format!("{}", details), "N: 12, Q: 0.500, D: 3");
    }
}
