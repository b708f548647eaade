//!
//! Composing and editing selection strings.
//!
use crate::region::parse_selection;
use crate::{PlateGrid, SeqType};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

/// Separator of hand-typed, plate-wide selection lists.
pub const LIST_SEPARATOR: char = ';';

lazy_static! {
    static ref PLATE_PREFIX: Regex = Regex::new(r"P([0-9]{2})-").unwrap();
}

/// Selection string for a drag from `start` to `end` on `plate`. Either token
/// may be empty; an empty token is left out.
pub fn build_selection(start: &str, end: &str, kind: SeqType, plate: usize) -> String {
    let prefix = kind.plate_prefix(plate);
    [start, end]
        .into_iter()
        .filter(|token| !token.is_empty())
        .map(|token| format!("{prefix}{token}"))
        .join(":")
}

/// Can `candidate` be added to `existing` on `plate`?
///
/// The candidate must select at least one well on the plate that `existing`
/// does not. When `occupied` holds the wells already taken by other samples,
/// the candidate must not touch any of them either.
pub fn additional_selection_valid(
    existing: &str,
    candidate: &str,
    kind: SeqType,
    plate: usize,
    occupied: Option<&PlateGrid>,
) -> bool {
    let current = parse_selection(existing, kind, plate);
    let added = parse_selection(candidate, kind, plate);
    if occupied.is_some_and(|occupied| added.intersects(occupied)) {
        return false;
    }
    added.adds_to(&current)
}

/// Append `candidate` to `existing` if it adds wells on `plate`, otherwise
/// return `existing` unchanged.
pub fn apply_selection(existing: &str, candidate: &str, kind: SeqType, plate: usize) -> String {
    apply_selection_with(existing, candidate, kind, plate, None)
}

/// [`apply_selection`] that also refuses wells set in `occupied`.
pub fn apply_selection_with(
    existing: &str,
    candidate: &str,
    kind: SeqType,
    plate: usize,
    occupied: Option<&PlateGrid>,
) -> String {
    if candidate.is_empty()
        || !additional_selection_valid(existing, candidate, kind, plate, occupied)
    {
        return existing.to_string();
    }
    if existing.is_empty() {
        candidate.to_string()
    } else {
        format!("{existing},{candidate}")
    }
}

/// Drop every `rt` token on `plate` from `selection`. A range keeps the
/// endpoint that is on another plate; a region with nothing left disappears.
pub fn remove_plate(selection: &str, plate: usize) -> String {
    let prefix = SeqType::Rt.plate_prefix(plate);
    selection
        .split(',')
        .filter_map(|region| {
            let kept = region
                .split(':')
                .filter(|token| !token.is_empty() && !token.starts_with(&prefix))
                .join(":");
            (!kept.is_empty()).then_some(kept)
        })
        .join(",")
}

/// Highest plate number referenced by an `rt` selection, at least 1.
pub fn count_plates(selection: &str) -> usize {
    PLATE_PREFIX
        .captures_iter(selection)
        .filter_map(|cap| cap[1].parse::<usize>().ok())
        .max()
        .unwrap_or(0)
        .max(1)
}

/// Number of wells an `rt` selection selects across all of its plates.
pub fn count_wells(selection: &str) -> usize {
    (0..count_plates(selection))
        .map(|plate| parse_selection(selection, SeqType::Rt, plate).count())
        .sum()
}

const LIST_SEPARATORS: &[char] = &[LIST_SEPARATOR];

fn list_items<'a>(list: &'a str, separators: &'static [char]) -> impl Iterator<Item = &'a str> {
    list.split(separators)
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// Join two hand-typed selection lists with [`LIST_SEPARATOR`], trimming
/// whitespace and dropping empty entries.
pub fn merge_selection_lists(a: &str, b: &str) -> String {
    list_items(a, LIST_SEPARATORS)
        .chain(list_items(b, LIST_SEPARATORS))
        .join(&LIST_SEPARATOR.to_string())
}

/// Concatenate two selection strings into one comma-separated selection.
/// A `;` between regions becomes `,`. An empty side is left out; everything
/// else is kept as written, so each side selects the same wells as before.
pub fn concat_selections(existing: &str, incoming: &str) -> String {
    [existing, incoming]
        .into_iter()
        .filter(|side| !side.is_empty())
        .map(|side| side.replace(LIST_SEPARATOR, ","))
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::parse_selection_into;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_selection() {
        assert_eq!(build_selection("A01", "", SeqType::P5, 0), "A01");
        assert_eq!(build_selection("A01", "B02", SeqType::P7, 0), "A01:B02");
        assert_eq!(build_selection("A01", "B02", SeqType::Rt, 0), "P01-A01:P01-B02");
        assert_eq!(build_selection("", "", SeqType::Rt, 0), "");
        assert_eq!(build_selection("", "B02", SeqType::Rt, 0), "P01-B02");
        assert_eq!(build_selection("A01", "", SeqType::Rt, 1), "P02-A01");
    }

    #[test]
    fn test_additional_selection_valid() {
        // no-op selections
        assert!(!additional_selection_valid("A01", "A01", SeqType::P5, 0, None));
        assert!(!additional_selection_valid("A01:B01", "A01", SeqType::P5, 0, None));
        // new wells
        assert!(additional_selection_valid("A01", "B01", SeqType::P5, 0, None));
        assert!(additional_selection_valid("A01", "A02", SeqType::P7, 0, None));
        // plate index
        let existing = "P01-A01,P02-B01";
        assert!(!additional_selection_valid(existing, "P02-C01", SeqType::Rt, 0, None));
        assert!(additional_selection_valid(existing, "P02-C01", SeqType::Rt, 1, None));
    }

    #[test]
    fn test_occupied_wells_are_refused() {
        let occupied = parse_selection("C01", SeqType::P5, 0);
        assert!(!additional_selection_valid("A01", "B01:D01", SeqType::P5, 0, Some(&occupied)));
        assert!(additional_selection_valid("A01", "B01", SeqType::P5, 0, Some(&occupied)));
        assert_eq!(
            apply_selection_with("A01", "C01", SeqType::P5, 0, Some(&occupied)),
            "A01"
        );
    }

    #[test]
    fn test_apply_selection() {
        assert_eq!(apply_selection("A01", "A01", SeqType::P5, 0), "A01");
        assert_eq!(apply_selection("A01", "B01", SeqType::P5, 0), "A01,B01");
        assert_eq!(apply_selection("", "", SeqType::P5, 0), "");
        assert_eq!(apply_selection("P01-A01", "P02-B01", SeqType::Rt, 0), "P01-A01");
        assert_eq!(
            apply_selection("P01-A01", "P02-B01", SeqType::Rt, 1),
            "P01-A01,P02-B01"
        );
        assert_eq!(apply_selection("", "P02-B01", SeqType::Rt, 1), "P02-B01");
    }

    #[test]
    fn test_remove_plate() {
        assert_eq!(
            remove_plate("P01-A02,P02-B05:P02-C05,P02-A02,P01-B05:P01-C05", 1),
            "P01-A02,P01-B05:P01-C05"
        );
        assert_eq!(
            remove_plate("P01-A02,P02-B05:P02-C05,P01-B05:P01-C05,P02-A02", 1),
            "P01-A02,P01-B05:P01-C05"
        );
        assert_eq!(
            remove_plate("P01-A02,P02-B05:P02-C05,P02-A02,P01-B05:P01-C05", 0),
            "P02-B05:P02-C05,P02-A02"
        );
        assert_eq!(remove_plate("P03-A01,P03-A02", 0), "P03-A01,P03-A02");
        assert_eq!(remove_plate("P01-A01", 0), "");
        assert_eq!(remove_plate("", 0), "");
    }

    #[test]
    fn test_count_plates() {
        assert_eq!(count_plates(""), 1);
        assert_eq!(count_plates("P01-A02"), 1);
        assert_eq!(count_plates("P03-C09"), 3);
        assert_eq!(count_plates("P01-A02,P01-C07,P01-H11,P01-F07"), 1);
        assert_eq!(count_plates("P01-A01:P01-A12,P02-H01:P02-H12"), 2);
        assert_eq!(count_plates("P01-A01:P01-H01,P01-A09:P01-H09"), 1);
        assert_eq!(
            count_plates("P01-A01:P01-H12,P02-A01:P02-H12,P03-A01:P03-H12,P04-A01:P04-H12"),
            4
        );
        assert_eq!(count_plates("P00-A01"), 1);
    }

    #[test]
    fn test_count_wells() {
        assert_eq!(count_wells(""), 0);
        assert_eq!(count_wells("P01-A01:P01-A12,P03-B01"), 13);
        assert_eq!(count_wells("P01-A01:P01-H12,P02-A01:P02-H12"), 192);
        // stops counting at the first malformed region
        assert_eq!(count_wells("P01-A01,P01-Z01,P01-B01"), 1);
    }

    #[test]
    fn test_merge_selection_lists() {
        assert_eq!(merge_selection_lists("", ""), "");
        assert_eq!(merge_selection_lists("P01-A01", ""), "P01-A01");
        assert_eq!(merge_selection_lists("", "P01-A01"), "P01-A01");
        assert_eq!(merge_selection_lists("P01-A01;", "P01-B01"), "P01-A01;P01-B01");
        assert_eq!(merge_selection_lists("P01-A01;;", ";P01-B01;"), "P01-A01;P01-B01");
        assert_eq!(
            merge_selection_lists(" P01-A01 ; P01-B01 ", " P01-C01 "),
            "P01-A01;P01-B01;P01-C01"
        );
    }

    #[test]
    fn test_concat_selections() {
        assert_eq!(concat_selections("", ""), "");
        assert_eq!(concat_selections("", "P01-A01"), "P01-A01");
        assert_eq!(concat_selections("P01-A01", ""), "P01-A01");
        assert_eq!(
            concat_selections("P01-A01,P01-C01:P01-E01", "P01-F01;P01-G01"),
            "P01-A01,P01-C01:P01-E01,P01-F01,P01-G01"
        );
    }

    #[test]
    fn test_concat_keeps_truncation() {
        let existing = "P01-A01,,P01-B01";
        let merged = concat_selections(existing, "P01-C01");
        assert_eq!(merged, "P01-A01,,P01-B01,P01-C01");
        assert_eq!(count_wells(existing), 1);
        assert_eq!(count_wells(&merged), count_wells(existing));

        let merged = concat_selections("P01-A01, P01-B01", "P01-C01");
        assert_eq!(merged, "P01-A01, P01-B01,P01-C01");
    }

    #[test]
    fn test_shared_occupancy_grid() {
        // occupancy of two other samples accumulated on one grid
        let mut occupied = PlateGrid::new();
        for other in ["P01-A01:P01-A04", "P01-B01,P02-H12"] {
            parse_selection_into(other, SeqType::Rt, 0, &mut occupied);
        }
        assert_eq!(occupied.count(), 5);
        assert_eq!(
            apply_selection_with("", "P01-B01:P01-C01", SeqType::Rt, 0, Some(&occupied)),
            ""
        );
        assert_eq!(
            apply_selection_with("", "P01-C01", SeqType::Rt, 0, Some(&occupied)),
            "P01-C01"
        );
    }
}
