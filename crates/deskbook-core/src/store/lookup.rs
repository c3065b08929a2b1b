// ── Identifier coercion for store lookups ──
//
// Route params arrive as strings while API payloads carry integers.
// Lookups accept either and compare on the integer value.

/// Anything that can be used to look up an entity by id.
///
/// Strings coerce the way `parseInt` does in a browser: leading whitespace
/// and an optional sign are skipped, then the longest run of decimal digits
/// (or hex digits after `0x`) is taken. `"12abc"` is `12`; `"abc"` has no
/// key and never matches.
pub trait LookupId {
    fn lookup_key(&self) -> Option<i64>;
}

impl LookupId for i64 {
    fn lookup_key(&self) -> Option<i64> {
        Some(*self)
    }
}

impl LookupId for i32 {
    fn lookup_key(&self) -> Option<i64> {
        Some(i64::from(*self))
    }
}

impl LookupId for u32 {
    fn lookup_key(&self) -> Option<i64> {
        Some(i64::from(*self))
    }
}

impl LookupId for u64 {
    fn lookup_key(&self) -> Option<i64> {
        i64::try_from(*self).ok()
    }
}

impl LookupId for usize {
    fn lookup_key(&self) -> Option<i64> {
        i64::try_from(*self).ok()
    }
}

impl LookupId for str {
    fn lookup_key(&self) -> Option<i64> {
        parse_int_prefix(self)
    }
}

impl LookupId for String {
    fn lookup_key(&self) -> Option<i64> {
        parse_int_prefix(self)
    }
}

impl<T: LookupId + ?Sized> LookupId for &T {
    fn lookup_key(&self) -> Option<i64> {
        (**self).lookup_key()
    }
}

impl<T: LookupId> LookupId for Option<T> {
    fn lookup_key(&self) -> Option<i64> {
        self.as_ref().and_then(LookupId::lookup_key)
    }
}

/// Integer prefix of `s`, or `None` when no digits lead the string.
pub(crate) fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, rest) = if rest.starts_with("0x") || rest.starts_with("0X") {
        (16, &rest[2..])
    } else {
        (10, rest)
    };

    let end = rest
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map_or(rest.len(), |(i, _)| i);
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }

    let magnitude = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_int_prefix("2"), Some(2));
        assert_eq!(parse_int_prefix("  42"), Some(42));
        assert_eq!(parse_int_prefix("-7"), Some(-7));
        assert_eq!(parse_int_prefix("+7"), Some(7));
    }

    #[test]
    fn trailing_garbage_is_ignored() {
        assert_eq!(parse_int_prefix("12abc"), Some(12));
        assert_eq!(parse_int_prefix("3.9"), Some(3));
    }

    #[test]
    fn hex_prefix() {
        assert_eq!(parse_int_prefix("0x1A"), Some(26));
        assert_eq!(parse_int_prefix("0x"), None);
    }

    #[test]
    fn no_digits_means_no_key() {
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn overflow_means_no_key() {
        assert_eq!(parse_int_prefix("99999999999999999999999"), None);
    }

    #[test]
    fn integers_and_strings_agree() {
        assert_eq!("2".lookup_key(), 2_i64.lookup_key());
        assert_eq!(String::from("2").lookup_key(), 2_u32.lookup_key());
        assert_eq!(Some("5").lookup_key(), Some(5));
        assert_eq!(None::<i64>.lookup_key(), None);
    }
}
