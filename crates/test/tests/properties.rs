use std::num::NonZeroUsize;

use bookconnect_application::{MatchSet, Paginator, Query, apply_query};
use bookconnect_core::{Book, Catalog};
use bookconnect_test::{AUTHORS, GENRES, make_catalog};
use proptest::prelude::*;

fn author_choice() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("any".to_string()),
        Just("a-nobody".to_string()),
        (0..AUTHORS.len()).prop_map(|i| AUTHORS[i].0.to_string()),
    ]
}

fn genre_choice() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("any".to_string()),
        Just("scifi".to_string()),
        (0..GENRES.len()).prop_map(|i| GENRES[i].0.to_string()),
    ]
}

fn title_choice() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("  ".to_string()),
        Just("book".to_string()),
        Just("BOOK 1".to_string()),
        Just("oK 2".to_string()),
        "[ a-zA-Z0-9]{0,4}",
    ]
}

/// Written out longhand so it shares nothing with the filter under test.
fn reference_match(book: &Book, title: &str, author: &str, genre: &str) -> bool {
    let title_ok =
        title.trim().is_empty() || book.title.to_lowercase().contains(&title.to_lowercase());
    let author_ok = author == "any" || book.author_id == author;
    let genre_ok = genre == "any" || book.genre_ids.iter().any(|g| g == genre);
    title_ok && author_ok && genre_ok
}

fn all_windows(paginator: &mut Paginator) -> Vec<usize> {
    let mut seen = paginator.current_window().to_vec();
    while paginator.remaining() > 0 {
        paginator.advance();
        seen.extend_from_slice(paginator.current_window());
    }
    seen
}

proptest! {
    #[test]
    fn query_result_is_ordered_matching_subset(
        count in 1usize..60,
        title in title_choice(),
        author in author_choice(),
        genre in genre_choice(),
    ) {
        let catalog = make_catalog(count);
        let matches = apply_query(&catalog, &Query::new(title.clone(), &author, &genre));

        let expected: Vec<usize> = catalog
            .books()
            .iter()
            .enumerate()
            .filter(|(_, book)| reference_match(book, &title, &author, &genre))
            .map(|(position, _)| position)
            .collect();
        prop_assert_eq!(matches.positions(), expected.as_slice());
    }

    #[test]
    fn unfiltered_query_returns_everything(count in 1usize..60) {
        let catalog = make_catalog(count);
        let matches = apply_query(&catalog, &Query::default());
        let everything = MatchSet::all(&catalog);
        prop_assert_eq!(matches.positions(), everything.positions());
        prop_assert_eq!(matches.len(), catalog.len());
    }

    #[test]
    fn windows_partition_the_match_set(count in 1usize..120, page_size in 1usize..40) {
        let catalog: Catalog = make_catalog(count);
        let matches = MatchSet::all(&catalog);
        let expected = matches.positions().to_vec();
        let mut paginator = Paginator::new(matches, NonZeroUsize::new(page_size).unwrap());

        prop_assert_eq!(all_windows(&mut paginator), expected);
    }

    #[test]
    fn remaining_hits_zero_on_last_window(count in 1usize..120, page_size in 1usize..40) {
        let catalog = make_catalog(count);
        let mut paginator =
            Paginator::new(MatchSet::all(&catalog), NonZeroUsize::new(page_size).unwrap());

        loop {
            let window = paginator.current_window().len();
            let remaining = paginator.remaining();
            prop_assert!(window <= page_size);
            prop_assert_eq!(paginator.shown().len() + remaining, count);
            if remaining == 0 {
                break;
            }
            prop_assert_eq!(window, page_size);
            paginator.advance();
        }

        paginator.advance();
        prop_assert!(paginator.current_window().is_empty());
        prop_assert_eq!(paginator.remaining(), 0);
    }
}
