//! Deadzone store integration tests.
//!
//! Covers insertion and merging, removal, and the `start:end` file format.

use std::fs;

use framepick::{
    DeadzoneSet, FramePickError, FrameRange, add_deadzone, deadzone_file_for,
    read_deadzone_file, write_deadzone_file,
};

fn range(start: u64, end: u64) -> FrameRange {
    FrameRange::new(start, end).expect("valid range")
}

fn rendered(set: &DeadzoneSet) -> Vec<String> {
    set.list().iter().map(ToString::to_string).collect()
}

// ── Insertion and merging ────────────────────────────────────────

#[test]
fn add_merges_adjacent_ranges() {
    let mut set = DeadzoneSet::new(100);
    set.add(10, Some(20)).unwrap();
    set.add(21, Some(25)).unwrap();
    assert_eq!(rendered(&set), ["10:25"]);
}

#[test]
fn add_merges_overlapping_ranges() {
    let mut set = DeadzoneSet::new(100);
    set.add(10, Some(20)).unwrap();
    set.add(15, Some(30)).unwrap();
    assert_eq!(rendered(&set), ["10:30"]);
}

#[test]
fn add_keeps_disjoint_ranges_sorted() {
    let mut set = DeadzoneSet::new(100);
    set.add(50, Some(60)).unwrap();
    set.add(10, Some(20)).unwrap();
    set.add(80, None).unwrap();
    assert_eq!(rendered(&set), ["10:20", "50:60", "80:80"]);
}

#[test]
fn add_bridges_two_ranges() {
    let mut set = DeadzoneSet::new(100);
    set.add(10, Some(20)).unwrap();
    set.add(30, Some(40)).unwrap();
    set.add(21, Some(29)).unwrap();
    assert_eq!(rendered(&set), ["10:40"]);
}

#[test]
fn add_swallows_contained_ranges() {
    let mut set = DeadzoneSet::new(100);
    set.add(12, Some(14)).unwrap();
    set.add(30, Some(31)).unwrap();
    set.add(5, Some(50)).unwrap();
    assert_eq!(rendered(&set), ["5:50"]);
}

#[test]
fn add_is_idempotent() {
    let mut set = DeadzoneSet::new(100);
    set.add(10, Some(20)).unwrap();
    let once = set.clone();
    set.add(10, Some(20)).unwrap();
    assert_eq!(set, once);
}

#[test]
fn add_single_frame() {
    let mut set = DeadzoneSet::new(100);
    set.add(5, None).unwrap();
    assert_eq!(rendered(&set), ["5:5"]);
    assert!(set.contains(5));
    assert!(!set.contains(4));
    assert!(!set.contains(6));
}

#[test]
fn add_last_frame_is_allowed() {
    let mut set = DeadzoneSet::new(100);
    set.add(90, Some(99)).unwrap();
    assert_eq!(set.available_frames(), 90);
}

#[test]
fn add_past_end_is_rejected_and_set_unchanged() {
    let mut set = DeadzoneSet::new(100);
    set.add(10, Some(20)).unwrap();
    let before = set.clone();

    let result = set.add(90, Some(100));
    assert!(matches!(result, Err(FramePickError::InvalidRange { .. })));
    assert_eq!(set, before);
}

#[test]
fn add_reversed_range_is_rejected() {
    let mut set = DeadzoneSet::new(100);
    let result = set.add(30, Some(20));
    assert!(matches!(result, Err(FramePickError::InvalidRange { .. })));
    assert!(set.is_empty());
}

#[test]
fn add_deadzone_is_pure() {
    let existing = vec![range(10, 20)];
    let merged = add_deadzone(&existing, 100, 21, Some(30)).unwrap();
    assert_eq!(merged, vec![range(10, 30)]);
    assert_eq!(existing, vec![range(10, 20)]);
}

#[test]
fn from_ranges_normalises() {
    let set =
        DeadzoneSet::from_ranges(100, [range(50, 60), range(10, 20), range(18, 30)]).unwrap();
    assert_eq!(rendered(&set), ["10:30", "50:60"]);
}

// ── Queries and removal ──────────────────────────────────────────

#[test]
fn available_frame_counts() {
    let mut set = DeadzoneSet::new(100);
    set.add(40, Some(60)).unwrap();
    assert_eq!(set.dead_frame_count(), 21);
    assert_eq!(set.available_frames(), 79);
    assert_eq!(set.available_frames_in(range(30, 49)), 10);
    assert_eq!(set.available_frames_in(range(41, 59)), 0);
}

#[test]
fn remove_whole_range() {
    let mut set = DeadzoneSet::from_ranges(100, [range(10, 20), range(50, 60)]).unwrap();
    assert!(set.remove(range(10, 20)));
    assert_eq!(rendered(&set), ["50:60"]);
    assert!(!set.remove(range(50, 55)));
    assert_eq!(rendered(&set), ["50:60"]);
}

// ── File format ──────────────────────────────────────────────────

#[test]
fn save_and_load_round_trip() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temporary_directory.path().join("clip_deadzones.txt");

    let mut set = DeadzoneSet::new(1000);
    set.add(0, Some(47)).unwrap();
    set.add(500, Some(620)).unwrap();
    set.save(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "0:47\n500:620\n");
    let loaded = DeadzoneSet::load(&path, 1000).unwrap();
    assert_eq!(loaded, set);
}

#[test]
fn load_missing_file_is_empty() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temporary_directory.path().join("absent_deadzones.txt");

    let set = DeadzoneSet::load(&path, 100).unwrap();
    assert!(set.is_empty());
    assert_eq!(set.total_frames(), 100);
}

#[test]
fn load_normalises_hand_edited_file() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temporary_directory.path().join("edited_deadzones.txt");
    fs::write(&path, "30:40\n10:20\n\n21:25\n").unwrap();

    let set = DeadzoneSet::load(&path, 100).unwrap();
    assert_eq!(rendered(&set), ["10:25", "30:40"]);
}

#[test]
fn load_rejects_out_of_bounds_range() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temporary_directory.path().join("long_deadzones.txt");
    fs::write(&path, "10:20\n90:150\n").unwrap();

    let result = DeadzoneSet::load(&path, 100);
    assert!(matches!(result, Err(FramePickError::InvalidRange { .. })));
}

#[test]
fn read_reports_malformed_line_number() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temporary_directory.path().join("broken_deadzones.txt");
    fs::write(&path, "10:20\n\nabc\n30:40\n").unwrap();

    match read_deadzone_file(&path) {
        Err(FramePickError::DeadzoneParse { line, content }) => {
            assert_eq!(line, 3);
            assert_eq!(content, "abc");
        }
        other => panic!("Expected DeadzoneParse, got {other:?}"),
    }
}

#[test]
fn read_rejects_bare_number_and_negative() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");

    let bare = temporary_directory.path().join("bare.txt");
    fs::write(&bare, "15\n").unwrap();
    assert!(matches!(
        read_deadzone_file(&bare),
        Err(FramePickError::DeadzoneParse { line: 1, .. })
    ));

    let negative = temporary_directory.path().join("negative.txt");
    fs::write(&negative, "0:5\n-3:9\n").unwrap();
    assert!(matches!(
        read_deadzone_file(&negative),
        Err(FramePickError::DeadzoneParse { line: 2, .. })
    ));
}

#[test]
fn read_keeps_file_order() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temporary_directory.path().join("raw.txt");
    write_deadzone_file(&path, &[range(30, 40), range(10, 20)]).unwrap();

    let raw = read_deadzone_file(&path).unwrap();
    assert_eq!(raw, vec![range(30, 40), range(10, 20)]);
}

#[test]
fn deadzone_file_sits_next_to_video() {
    let path = deadzone_file_for("videos/holiday.mp4");
    assert_eq!(path, std::path::Path::new("videos/holiday_deadzones.txt"));
}

// ── Range parsing ────────────────────────────────────────────────

#[test]
fn parse_range_forms() {
    assert_eq!("40:60".parse::<FrameRange>().unwrap(), range(40, 60));
    assert_eq!(" 7 ".parse::<FrameRange>().unwrap(), range(7, 7));
    assert_eq!(range(3, 9).to_string(), "3:9");
}

#[test]
fn parse_range_rejects_bad_input() {
    let negative = "-5:10".parse::<FrameRange>().unwrap_err().to_string();
    assert!(negative.contains("negative"), "{negative}");

    let garbage = "a:b".parse::<FrameRange>().unwrap_err().to_string();
    assert!(garbage.contains("not an integer"), "{garbage}");

    let reversed = "20:10".parse::<FrameRange>().unwrap_err().to_string();
    assert!(reversed.contains("start must not exceed end"), "{reversed}");
}

#[test]
fn single_frame_range() {
    let frame = FrameRange::single(42);
    assert_eq!(frame, range(42, 42));
    assert_eq!(frame.len(), 1);
    assert_eq!(frame.midpoint(), 42);
}

#[test]
fn touching_ranges() {
    assert!(range(10, 20).touches(&range(21, 30)));
    assert!(range(21, 30).touches(&range(10, 20)));
    assert!(range(10, 20).touches(&range(15, 16)));
    assert!(!range(10, 20).touches(&range(22, 30)));
    assert!(range(0, u64::MAX).touches(&range(5, 5)));
}
