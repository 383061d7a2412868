use std::cell::RefCell;
use std::rc::Rc;

use venue_core::prelude::*;

type Notifications = Rc<RefCell<Vec<(String, String)>>>;

fn recording_monitor(
    threshold: i64,
) -> (DivergeMonitor<impl FnMut(&Stock, &Stock)>, Notifications) {
    let notifications: Notifications = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&notifications);
    let monitor = DivergeMonitor::new(threshold, move |changed: &Stock, other: &Stock| {
        sink.borrow_mut()
            .push((changed.name.clone(), other.name.clone()));
    })
    .unwrap();
    (monitor, notifications)
}

#[test]
fn test_stock_display() {
    let stock = Stock {
        name: "test".into(),
        price: 5,
    };
    assert_eq!(stock.to_string(), "name[test] price[5]");
}

#[test]
fn test_stock_pair_display() {
    let a = Rc::new(RefCell::new(Stock {
        name: "a".into(),
        price: 1,
    }));
    let b = Rc::new(RefCell::new(Stock {
        name: "b".into(),
        price: 2,
    }));
    let pair = StockPair::new(a, b);
    assert_eq!(pair.to_string(), "one[name[a] price[1]] two[name[b] price[2]]");
}

#[test]
fn test_bad_threshold_rejected() {
    for threshold in [0, -4] {
        let result = DivergeMonitor::new(threshold, |_: &Stock, _: &Stock| {});
        let error = result.err().expect("threshold must be rejected");
        assert_eq!(error, MonitorError::InvalidArgument);
        assert_eq!(error.to_string(), "threshold <= 0");
    }
}

#[test]
fn test_monitor_interns_unknown_stocks() {
    let (mut monitor, _notifications) = recording_monitor(5);

    let watched = [("a", "b"), ("c", "d"), ("e", "f")];
    for (one, two) in watched {
        monitor.monitor(one, two);
        let expected = format!("one[name[{one}] price[0]] two[name[{two}] price[0]]");
        assert_eq!(monitor.pairings(one)[0].to_string(), expected);
        assert_eq!(monitor.pairings(two)[0].to_string(), expected);
    }
}

#[test]
fn test_monitor_same_name_is_noop() {
    let (mut monitor, _notifications) = recording_monitor(5);

    monitor.monitor("a", "a");
    assert!(monitor.pairings("a").is_empty());
}

#[test]
fn test_monitor_duplicate_pair_is_noop() {
    let (mut monitor, _notifications) = recording_monitor(5);

    monitor.monitor("a", "b");
    monitor.monitor("a", "b");
    monitor.monitor("b", "a");

    assert_eq!(monitor.pairings("a").len(), 1);
    assert_eq!(monitor.pairings("b").len(), 1);
    assert!(
        Rc::ptr_eq(&monitor.pairings("a")[0], &monitor.pairings("b")[0]),
        "both sides share the one pair"
    );
}

#[test]
fn test_pairings_listed_once_per_side() {
    let (mut monitor, _notifications) = recording_monitor(5);

    for other in ["b", "c", "d", "e", "f"] {
        monitor.monitor("a", other);
    }

    assert_eq!(monitor.pairings("a").len(), 5);
    for other in ["b", "c", "d", "e", "f"] {
        let pairs = monitor.pairings(other);
        assert_eq!(pairs.len(), 1);
        let expected = format!("one[name[a] price[0]] two[name[{other}] price[0]]");
        assert_eq!(pairs[0].to_string(), expected);
    }
    assert!(monitor.pairings("zzz").is_empty());
}

#[test]
fn test_update_unknown_name_creates_stock() {
    let (mut monitor, notifications) = recording_monitor(5);

    monitor.update("lonely", 40);
    assert!(notifications.borrow().is_empty());
    assert!(monitor.pairings("lonely").is_empty());

    // now watchable like any interned stock
    monitor.monitor("lonely", "other");
    assert_eq!(
        monitor.pairings("other")[0].to_string(),
        "one[name[lonely] price[40]] two[name[other] price[0]]"
    );
}

#[test]
fn test_unset_price_never_diverges() {
    let (mut monitor, notifications) = recording_monitor(1);

    monitor.monitor("a", "b");
    monitor.update("a", 1000);
    assert!(
        notifications.borrow().is_empty(),
        "b is still unset, so the pair cannot diverge"
    );
}

#[test]
fn test_update_notifies_changed_stock_first() {
    let (mut monitor, notifications) = recording_monitor(5);

    let pairings = [
        ("a", "b"),
        ("a", "c"),
        ("a", "d"),
        ("b", "c"),
        ("b", "d"),
        ("c", "d"),
    ];
    for (one, two) in pairings {
        monitor.monitor(one, two);
    }

    struct Step {
        name: &'static str,
        price: i64,
        diverged: &'static [&'static str],
    }
    let steps = [
        Step { name: "a", price: 1, diverged: &[] },          //  a=1  b=0  c=0  d=0
        Step { name: "b", price: 7, diverged: &["a"] },       //  a=1  b=7  c=0  d=0
        Step { name: "c", price: 13, diverged: &["a", "b"] }, //  a=1  b=7  c=13 d=0
        Step { name: "d", price: 7, diverged: &["a", "c"] },  //  a=1  b=7  c=13 d=7
        Step { name: "a", price: 2, diverged: &["c"] },       //  a=2  b=7  c=13 d=7
        Step {
            name: "a",
            price: 1,
            diverged: &["b", "c", "d"],
        }, //  a=1  b=7  c=13 d=7
    ];

    for step in steps {
        notifications.borrow_mut().clear();
        monitor.update(step.name, step.price);

        let seen = notifications.borrow();
        assert_eq!(seen.len(), step.diverged.len(), "update of {}", step.name);
        for other in step.diverged {
            assert!(
                seen.iter()
                    .any(|(changed, second)| changed == step.name && second == other),
                "expected {} to be reported against {}",
                step.name,
                other
            );
        }
    }
}
