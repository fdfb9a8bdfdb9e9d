// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Every fragment goes to exactly one segment, the same one every time

use fragmenter::{QueryContext, filter_fragments_for_segment};
use proptest::prelude::*;

fn assignment(len: usize, count: u32, xid: u64) -> Vec<Vec<usize>> {
    let ctx = QueryContext::new(0, count, Some(xid));
    (0..count)
        .map(|segment| {
            filter_fragments_for_segment(Some((0..len).collect()), &ctx.for_segment(segment))
                .expect("valid context")
        })
        .collect()
}

proptest! {
    #[test]
    fn union_is_complete_and_disjoint(len in 0usize..200, count in 1u32..40, xid in any::<u64>()) {
        let parts = assignment(len, count, xid);
        let mut seen = vec![0u32; len];
        for part in &parts {
            for &position in part {
                seen[position] += 1;
            }
        }
        prop_assert!(seen.iter().all(|&n| n == 1));
    }

    #[test]
    fn subsets_keep_list_order(len in 0usize..200, count in 1u32..40, xid in any::<u64>()) {
        for part in assignment(len, count, xid) {
            prop_assert!(part.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn assignment_is_deterministic(len in 0usize..100, count in 1u32..20, xid in any::<u64>()) {
        prop_assert_eq!(assignment(len, count, xid), assignment(len, count, xid));
    }

    #[test]
    fn load_is_balanced(len in 0usize..200, count in 1u32..40, xid in any::<u64>()) {
        let sizes: Vec<usize> = assignment(len, count, xid).iter().map(Vec::len).collect();
        let max = sizes.iter().copied().max().unwrap_or(0);
        let min = sizes.iter().copied().min().unwrap_or(0);
        prop_assert!(max - min <= 1);
    }

    #[test]
    fn xid_rotates_the_owner_of_the_first_fragment(count in 2u32..40, xid in any::<u64>()) {
        let parts = assignment(1, count, xid);
        let owner = (xid % u64::from(count)) as usize;
        prop_assert_eq!(&parts[owner], &vec![0usize]);
    }
}
