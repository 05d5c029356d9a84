use bookconnect_application::{DialogKind, OptionKind, Query, WindowPlacement};
use bookconnect_core::{Rgb, ThemeColors, ThemeValue};
use bookconnect_test::{
    RecordingSink, RenderCall, make_browser, make_catalog, scenario_catalog,
};

#[test]
fn forty_books_page_in_two_windows() {
    let mut browser = make_browser(make_catalog(40), 36, false);
    let mut sink = RecordingSink::default();

    browser.start(&mut sink);
    assert_eq!(browser.paginator().current_window().len(), 36);
    assert_eq!(browser.remaining(), 4);

    let more = browser.show_more(&mut sink);
    assert_eq!(more.len(), 4);
    assert_eq!(browser.remaining(), 0);

    assert!(browser.show_more(&mut sink).is_empty());
    assert_eq!(sink.visible_ids().len(), 40);
}

#[test]
fn startup_call_order() {
    let mut browser = make_browser(make_catalog(3), 2, false);
    let mut sink = RecordingSink::default();
    browser.start(&mut sink);

    let calls = sink.take();
    assert_eq!(calls.len(), 5);
    assert!(matches!(
        &calls[0],
        RenderCall::Window { ids, placement: WindowPlacement::Replace } if ids.len() == 2
    ));
    assert!(matches!(
        &calls[1],
        RenderCall::Options { kind: OptionKind::Genre, values } if values[0] == "any"
    ));
    assert!(matches!(
        &calls[2],
        RenderCall::Options { kind: OptionKind::Author, values }
            if values == &["any", "a-herbert", "a-tolkien", "a-leguin"]
    ));
    assert_eq!(calls[3], RenderCall::Colors(ThemeValue::Day.colors()));
    assert_eq!(calls[4], RenderCall::Remaining(1));
}

#[test]
fn title_search_is_case_insensitive_substring() {
    let mut browser = make_browser(scenario_catalog(), 36, false);
    let mut sink = RecordingSink::default();
    browser.start(&mut sink);
    sink.take();

    let outcome = browser.submit_search(Query::new("dune", "any", "any"), &mut sink);
    assert_eq!(outcome.matched, 1);
    assert_eq!(outcome.window[0].title, "Dune Messiah");
    assert!(!outcome.empty);
    assert_eq!(sink.visible_ids(), vec!["bk-dune"]);
}

#[test]
fn title_case_is_ignored_and_genre_narrows() {
    let mut browser = make_browser(scenario_catalog(), 36, false);
    let mut sink = RecordingSink::default();

    let outcome = browser.submit_search(Query::new("DUNE m", "any", "any"), &mut sink);
    assert_eq!(outcome.matched, 1);
    assert_eq!(outcome.window[0].title, "Dune Messiah");

    let outcome = browser.submit_search(Query::new("", "any", "g-classic"), &mut sink);
    assert_eq!(outcome.matched, 1);
    assert_eq!(outcome.window[0].title, "The Hobbit");

    let outcome = browser.submit_search(Query::new("", "a-herbert", "g-fantasy"), &mut sink);
    assert!(outcome.empty);
}

#[test]
fn unknown_genre_signals_empty_state() {
    let mut browser = make_browser(scenario_catalog(), 36, false);
    let mut sink = RecordingSink::default();
    browser.start(&mut sink);
    browser.open_search(&mut sink);
    sink.take();

    let outcome = browser.submit_search(Query::new("", "any", "scifi"), &mut sink);
    assert_eq!(outcome.matched, 0);
    assert!(outcome.empty);
    assert!(browser.empty_state());
    assert_eq!(
        sink.take(),
        vec![
            RenderCall::Window {
                ids: Vec::new(),
                placement: WindowPlacement::Replace
            },
            RenderCall::Remaining(0),
            RenderCall::EmptyState(true),
            RenderCall::Dialog(DialogKind::Search, false),
        ]
    );

    browser.submit_search(Query::default(), &mut sink);
    assert!(!browser.empty_state());
    assert_eq!(sink.visible_ids(), vec!["bk-dune", "bk-hobbit"]);
}

#[test]
fn dark_preference_starts_at_night() {
    let mut browser = make_browser(scenario_catalog(), 36, true);
    let mut sink = RecordingSink::default();
    assert_eq!(browser.theme(), ThemeValue::Night);

    browser.start(&mut sink);
    let night = ThemeColors {
        dark: Rgb(255, 255, 255),
        light: Rgb(10, 10, 20),
    };
    assert!(sink.calls.contains(&RenderCall::Colors(night)));
}

#[test]
fn settings_submit_applies_and_closes() {
    let mut browser = make_browser(scenario_catalog(), 36, false);
    let mut sink = RecordingSink::default();
    browser.open_settings(&mut sink);
    sink.take();

    assert_eq!(browser.submit_settings("night", &mut sink), ThemeValue::Night);
    assert_eq!(
        sink.take(),
        vec![
            RenderCall::Colors(ThemeValue::Night.colors()),
            RenderCall::Dialog(DialogKind::Settings, false),
        ]
    );

    // Unrecognised values fall back to the environment preference.
    assert_eq!(browser.submit_settings("sepia", &mut sink), ThemeValue::Day);
    assert_eq!(sink.take(), vec![RenderCall::Colors(ThemeValue::Day.colors())]);
}

#[test]
fn cancel_restores_pre_open_state() {
    let mut browser = make_browser(make_catalog(10), 4, false);
    let mut sink = RecordingSink::default();
    browser.start(&mut sink);
    browser.show_more(&mut sink);
    let before_theme = browser.theme();
    let before_shown = browser.paginator().shown().to_vec();
    sink.take();

    assert!(browser.open_settings(&mut sink));
    browser.edit_settings().unwrap().toggle();
    assert!(browser.cancel_settings(&mut sink));
    assert_eq!(browser.theme(), before_theme);
    assert_eq!(browser.settings_form().selection, before_theme);

    assert!(browser.open_search(&mut sink));
    browser.edit_search().unwrap().push_char('x');
    browser.cycle_search_selector(true);
    assert!(browser.cancel_search(&mut sink));
    assert_eq!(browser.search_form().query, Query::default());
    assert_eq!(browser.paginator().shown(), before_shown.as_slice());

    assert_eq!(
        sink.take(),
        vec![
            RenderCall::Dialog(DialogKind::Settings, true),
            RenderCall::Dialog(DialogKind::Settings, false),
            RenderCall::Dialog(DialogKind::Search, true),
            RenderCall::Dialog(DialogKind::Search, false),
        ]
    );

    // Cancelling a closed dialog changes nothing.
    assert!(!browser.cancel_search(&mut sink));
    assert!(sink.calls.is_empty());
}

#[test]
fn selection_opens_and_closes_description() {
    let mut browser = make_browser(scenario_catalog(), 36, false);
    let mut sink = RecordingSink::default();

    let details = browser.select_book("bk-hobbit", &mut sink).unwrap();
    assert_eq!(details.subtitle, "J.R.R. Tolkien 1965");
    assert_eq!(
        sink.take(),
        vec![
            RenderCall::Details("bk-hobbit".to_string()),
            RenderCall::Dialog(DialogKind::Description, true),
        ]
    );

    assert!(browser.select_book("bk-dune", &mut sink).is_none());
    assert!(!browser.is_dialog_open(DialogKind::Description));
    assert!(browser.active_book().is_none());

    assert!(browser.select_book("bk-missing", &mut sink).is_none());
    assert!(!browser.is_dialog_open(DialogKind::Description));
}
