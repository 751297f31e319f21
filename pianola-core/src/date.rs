/// Derive a year from an ISO-partial date string.
///
/// Takes the first four characters; if all four are ASCII digits they are
/// parsed as the year. Anything else ("19??", "", "198", missing) yields
/// `None` — a malformed date is an absent value, never an error.
pub fn year_from_date(date: Option<&str>) -> Option<i32> {
    let date = date?;
    let prefix = date.get(..4)?;
    if prefix.bytes().all(|b| b.is_ascii_digit()) {
        prefix.parse().ok()
    } else {
        None
    }
}

/// Bucket a year into its decade: 1987 -> 1980.
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_from_full_date() {
        assert_eq!(year_from_date(Some("1932-05-01")), Some(1932));
    }

    #[test]
    fn test_year_from_year_only() {
        assert_eq!(year_from_date(Some("2005")), Some(2005));
    }

    #[test]
    fn test_year_from_partial_or_garbage() {
        assert_eq!(year_from_date(Some("198")), None);
        assert_eq!(year_from_date(Some("19??")), None);
        assert_eq!(year_from_date(Some("")), None);
        assert_eq!(year_from_date(Some("abcd-01-01")), None);
        assert_eq!(year_from_date(None), None);
    }

    #[test]
    fn test_year_from_non_ascii_prefix() {
        // Multibyte char in the first four bytes must not panic or parse.
        assert_eq!(year_from_date(Some("19\u{e9}9")), None);
    }

    #[test]
    fn test_decade_buckets() {
        assert_eq!(decade_of(1987), 1980);
        assert_eq!(decade_of(1990), 1990);
        assert_eq!(decade_of(2009), 2000);
    }
}
