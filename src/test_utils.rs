use crate::predicate::Predicate;

/// A leaf predicate.
pub(crate) fn leaf(name: &str) -> Predicate {
    Predicate::leaf(name)
}

/// A predicate whose arguments are all leaves.
pub(crate) fn pred(name: &str, args: &[&str]) -> Predicate {
    Predicate::new(name, args.iter().map(|a| Predicate::leaf(*a)).collect())
}
