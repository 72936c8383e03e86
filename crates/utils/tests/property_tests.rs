use proptest::prelude::*;
use std::path::{Component, PathBuf};
use tarry_utils::paths::clean_path;

// Relative and absolute paths mixing names, `.` and `..`
fn arb_path() -> impl Strategy<Value = PathBuf> {
    (
        any::<bool>(),
        prop::collection::vec(
            prop_oneof![
                "[a-zA-Z0-9_-]{1,8}".prop_map(|s| s.to_string()),
                Just(".".to_string()),
                Just("..".to_string()),
            ],
            0..8,
        ),
    )
        .prop_map(|(absolute, parts)| {
            let mut path = if absolute {
                PathBuf::from("/")
            } else {
                PathBuf::new()
            };
            for part in parts {
                path.push(part);
            }
            path
        })
}

proptest! {
    #[test]
    fn clean_path_is_idempotent(path in arb_path()) {
        let once = clean_path(&path);
        prop_assert_eq!(clean_path(&once), once);
    }

    #[test]
    fn clean_path_drops_current_dir_segments(path in arb_path()) {
        let cleaned = clean_path(&path);
        if cleaned != PathBuf::from(".") {
            prop_assert!(!cleaned.components().any(|c| c == Component::CurDir));
        }
    }

    #[test]
    fn absolute_paths_never_keep_parent_segments(path in arb_path()) {
        if path.is_absolute() {
            let cleaned = clean_path(&path);
            prop_assert!(cleaned.is_absolute());
            prop_assert!(!cleaned.components().any(|c| c == Component::ParentDir));
        }
    }

    #[test]
    fn parent_segments_only_lead_relative_paths(path in arb_path()) {
        let cleaned = clean_path(&path);
        let after_first_name = cleaned
            .components()
            .skip_while(|c| *c == Component::ParentDir)
            .any(|c| c == Component::ParentDir);
        prop_assert!(!after_first_name);
    }
}
