/// Treat blank strings like absent fields; surrounding whitespace is dropped.
pub(crate) fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Uniform "at least one field" guard for partial updates.
pub(crate) fn any_present(flags: &[bool]) -> bool {
    flags.iter().any(|f| *f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_absent() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some(" T1 ".into())), Some("T1".into()));
        assert!(!any_present(&[false, false]));
        assert!(any_present(&[false, true]));
    }
}
