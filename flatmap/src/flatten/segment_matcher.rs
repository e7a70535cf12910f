//! Longest-prefix matching of identifier segments against member names

use std::cmp::Reverse;

use crate::config::NamingConvention;
use crate::type_graph::Member;

/// A member chosen for the head of a residual identifier
#[derive(Debug, Clone, Copy)]
pub struct SegmentMatch<'m, 'r> {
    /// Matched member
    pub member:    &'m Member,
    /// What is left of the residual after the member name (and separator)
    pub remaining: &'r str,
}

/// Strip `name` from the front of `residual` under `convention`.
///
/// Under snake_case the name must end the residual or be followed by the separator,
/// which is consumed. Under PascalCase any exact prefix counts.
pub fn strip_segment<'r>(
    residual: &'r str,
    name: &str,
    convention: NamingConvention,
) -> Option<&'r str> {
    if name.is_empty() {
        return None;
    }
    let rest = residual.strip_prefix(name)?;
    match convention.separator() {
        None => Some(rest),
        Some(_) if rest.is_empty() => Some(rest),
        Some(separator) => rest.strip_prefix(separator).filter(|r| !r.is_empty()),
    }
}

/// Choose the member whose name is the longest prefix of `residual`.
///
/// Equal-length candidates resolve to the first declared.
pub fn match_segment<'m, 'r>(
    residual: &'r str,
    members: &'m [Member],
    convention: NamingConvention,
) -> Option<SegmentMatch<'m, 'r>> {
    members
        .iter()
        .filter_map(|member| {
            strip_segment(residual, member.name, convention)
                .map(|remaining| SegmentMatch { member, remaining })
        })
        // min_by_key keeps the first of equal keys
        .min_by_key(|candidate| Reverse(candidate.member.name.len()))
}
