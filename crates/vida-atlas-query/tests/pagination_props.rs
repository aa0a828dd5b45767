// SPDX-License-Identifier: Apache-2.0

use proptest::prelude::*;
use proptest::test_runner::Config;
use vida_atlas_query::PageWindow;

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn current_page_always_lands_inside_the_book(
        requested in 0_u64..10_000,
        page_size in 0_u64..1_000,
        total_items in 0_u64..1_000_000,
    ) {
        let window = PageWindow::compute(requested, page_size, total_items);
        prop_assert!(window.total_pages >= 1);
        prop_assert!(window.current_page >= 1);
        prop_assert!(window.current_page <= window.total_pages);
        prop_assert!(window.page_size >= 1);
    }

    #[test]
    fn offset_never_skips_past_the_collection(
        requested in 0_u64..10_000,
        page_size in 1_u64..1_000,
        total_items in 1_u64..1_000_000,
    ) {
        let window = PageWindow::compute(requested, page_size, total_items);
        prop_assert!(window.offset() < window.total_items);
    }

    #[test]
    fn every_item_belongs_to_exactly_one_page(
        page_size in 1_u64..200,
        total_items in 0_u64..10_000,
    ) {
        let window = PageWindow::compute(1, page_size, total_items);
        let last = PageWindow::compute(window.total_pages, page_size, total_items);
        let covered = (last.total_pages - 1) * page_size;
        prop_assert!(covered < total_items.max(1));
        prop_assert!(total_items <= last.total_pages * page_size);
    }
}
