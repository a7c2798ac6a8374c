#![no_main]

use gramcheck::{CompareConfig, Matches, TreeFormatter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(spec) = std::str::from_utf8(data) {
        let formatter = TreeFormatter::default();
        let Ok(tree) = formatter.parse(spec) else {
            return;
        };

        let compact = formatter.render(&tree);
        let pretty = formatter.render_pretty(&tree);
        assert_eq!(formatter.parse(&compact).unwrap(), tree);
        assert_eq!(formatter.parse(&pretty).unwrap(), tree);

        if !tree.contains_wildcard() {
            assert!(tree.matches(&tree, &CompareConfig::default()).is_ok());
        }
    }
});
