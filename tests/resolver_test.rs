use railtalk::resolver::{NO_ATTRIBUTE, NO_LABEL, UNRECOGNIZED_PHRASE};
use railtalk::{resolve, Resolution, Route};

mod common;
use common::{default_store, resolve_at, GARBAGE};

#[test]
fn test_every_atomic_phrase_resolves_to_itself() {
    let store = default_store();
    let entries: Vec<(String, i32)> = store
        .atomic_commands()
        .iter()
        .map(|e| (e.phrase.clone(), e.label))
        .collect();

    for threshold in [0, 50, 90, 100] {
        for (phrase, label) in &entries {
            let res = resolve_at(&store, phrase, threshold);
            assert_eq!(&res.canonical_phrase, phrase, "threshold {}", threshold);
            assert_eq!(res.label, *label, "label for '{}'", phrase);
            assert_eq!(res.attribute, NO_ATTRIBUTE);
        }
    }
}

#[test]
fn test_threshold_monotonicity() {
    let store = default_store();
    // (transcript, best atomic score under the default InDel ratio)
    let cases = [
        ("отцепкв", 86),
        ("отказа", 91),
        ("тормозит", 94),
        ("зарядка тормозной магистрал", 98),
        ("вперед на башмак", 100),
    ];

    for (transcript, score) in cases {
        let mut last_atomic: Option<Resolution> = None;
        for threshold in (0..=100u8).rev() {
            let res = resolve_at(&store, transcript, threshold);
            if threshold <= score {
                assert_eq!(res.route, Route::Atomic, "'{}' at {}", transcript, threshold);
                if let Some(ref prev) = last_atomic {
                    assert_eq!(prev, &res, "lowering the bar changed '{}'", transcript);
                }
                last_atomic = Some(res);
            } else {
                assert_eq!(res, Resolution::unrecognized(), "'{}' at {}", transcript, threshold);
            }
        }
    }
}

#[test]
fn test_numeral_summation() {
    let store = default_store();
    let quantity_label = store.quantity_commands().get("протянуть").unwrap();

    let res = resolve(&store, "протянуть один вагон");
    assert_eq!(res.attribute, 1);
    assert_eq!(res.label, quantity_label);

    let res = resolve(&store, "осадить пять");
    assert_eq!(res.attribute, 5);
    assert_eq!(res.label, 4);

    let res = resolve(&store, "осадить сто двадцать");
    assert_eq!(res.attribute, 120);
    assert_eq!(res.canonical_phrase, "осадить на сто двадцать");

    let res = resolve(&store, "протянуть двадцать пять");
    assert_eq!(res.attribute, 25);
    assert_eq!(res.canonical_phrase, "протянуть на двадцать пять вагонов");
}

#[test]
fn test_mixed_digit_and_word_aggregation() {
    let store = default_store();

    let res = resolve(&store, "осадить два 3");
    assert_eq!(res.label, 4);
    assert_eq!(res.attribute, 5);
    assert_eq!(res.canonical_phrase, "осадить на два вагона 3 вагона");

    let res = resolve(&store, "протянуть пять и 10");
    assert_eq!(res.label, 10);
    assert_eq!(res.attribute, 15);
    assert_eq!(res.canonical_phrase, "протянуть на пять вагонов 10 вагонов");
}

#[test]
fn test_partially_recognized() {
    let store = default_store();
    let res = resolve(&store, "протянуть немного");
    assert_eq!(res.canonical_phrase, "протянуть");
    assert_eq!(res.label, 10);
    assert_eq!(res.attribute, NO_ATTRIBUTE);
    assert!(res.is_recognized());
}

#[test]
fn test_truncated_words_still_resolve() {
    let store = default_store();
    // Dropped trailing letters, as ASR often clips word endings
    assert_eq!(resolve(&store, "тормозит").label, 21);
    assert_eq!(resolve(&store, "отпустит").label, 22);
    assert_eq!(resolve(&store, "отказа").label, 0);

    let res = resolve(&store, "протянуть восем вагонов");
    assert_eq!(res.attribute, 8);
    assert_eq!(res.canonical_phrase, "протянуть на восемь вагонов");
}

#[test]
fn test_stem_threshold_is_strict() {
    let store = default_store();
    assert_eq!(resolve(&store, "протяни двадцать"), Resolution::unrecognized());
}

#[test]
fn test_total_failure() {
    let store = default_store();
    let res = resolve(&store, "совершенно случайный текст без связи");
    assert_eq!(res.label, NO_LABEL);
    assert_eq!(res.canonical_phrase, UNRECOGNIZED_PHRASE);
    assert_eq!(res.attribute, NO_ATTRIBUTE);
}

#[test]
fn test_garbage_is_unrecognized() {
    let store = default_store();
    for text in GARBAGE {
        assert_eq!(
            resolve(&store, text),
            Resolution::unrecognized(),
            "'{}' should not resolve",
            text
        );
    }
}

#[test]
fn test_digits_need_a_quantity_stem() {
    let store = default_store();
    assert_eq!(resolve(&store, "12"), Resolution::unrecognized());
    assert_eq!(resolve(&store, "отцепка 5"), Resolution::unrecognized());
}

#[test]
fn test_mutation_visibility() {
    let store = default_store();
    assert!(!resolve(&store, "новая команда").is_recognized());

    store.upsert_atomic_command("новая команда", 99);
    let res = resolve(&store, "новая команда");
    assert_eq!(res.label, 99);
    assert_eq!(res.canonical_phrase, "новая команда");

    store.upsert_atomic_command("новая команда", 100);
    assert_eq!(resolve(&store, "новая команда").label, 100);
}

#[test]
fn test_no_false_quantity_escalation() {
    let store = default_store();

    // Close enough to an atomic phrase, digit token included
    let res = resolve(&store, "прекратить зарядку тормозной магистрали 5");
    assert_eq!(res.label, 20);
    assert_eq!(res.route, Route::Atomic);
    assert_eq!(res.attribute, NO_ATTRIBUTE);

    // An atomic phrase built from a quantity stem and a numeral
    store.upsert_atomic_command("осадить два вагона к горке", 31);
    let res = resolve(&store, "осадить два вагона к горке");
    assert_eq!(res.label, 31);
    assert_eq!(res.route, Route::Atomic);
    assert_eq!(res.attribute, NO_ATTRIBUTE);
}
