//! Registry lifecycle and dump format tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use proflog_core::{MetricRegistry, MetricValue, ProflogError};

mod common;
use common::*;

#[test]
fn empty_registry_dumps_bare_braces() {
    let reg = MetricRegistry::new();
    assert_eq!(reg.dump(), "{}");
    assert!(reg.is_empty());
}

#[test]
fn single_set_lifecycle() {
    let reg = MetricRegistry::new();
    let pf = fake_set_1();
    reg.add(Arc::clone(&pf)).unwrap();

    assert_eq!(
        reg.dump(),
        sd("{'fake_proflogger_1':{'element1':0,'element2':0,'element3':{'count':0,'sum':0},},}")
    );

    pf.inc(SET1_ELEMENT_1).unwrap();
    pf.fset(SET1_ELEMENT_2, 0.5).unwrap();
    pf.finc(SET1_ELEMENT_3, 100.0).unwrap();
    assert_eq!(
        reg.dump(),
        sd("{'fake_proflogger_1':{'element1':1,'element2':0.5,'element3':{'count':1,'sum':100},},}")
    );

    pf.finc(SET1_ELEMENT_3, 0.0).unwrap();
    pf.finc(SET1_ELEMENT_3, 25.0).unwrap();
    assert_eq!(
        reg.dump(),
        sd("{'fake_proflogger_1':{'element1':1,'element2':0.5,'element3':{'count':3,'sum':125},},}")
    );
}

#[test]
fn multiple_sets_remove_and_clear() {
    let reg = MetricRegistry::new();
    let pf1 = fake_set_1();
    let pf2 = fake_set_2();
    reg.add(Arc::clone(&pf1)).unwrap();
    reg.add(Arc::clone(&pf2)).unwrap();

    assert_eq!(
        reg.dump(),
        sd("{'fake_proflogger_1':{'element1':0,'element2':0,'element3':{'count':0,'sum':0},},\
            'fake_proflogger_2':{'foo':0,'bar':0,},}")
    );

    pf1.inc(SET1_ELEMENT_1).unwrap();
    pf1.inc_by(SET1_ELEMENT_1, 5).unwrap();
    assert_eq!(
        reg.dump(),
        sd("{'fake_proflogger_1':{'element1':6,'element2':0,'element3':{'count':0,'sum':0},},\
            'fake_proflogger_2':{'foo':0,'bar':0,},}")
    );

    assert!(reg.remove(&pf2));
    assert_eq!(
        reg.dump(),
        sd("{'fake_proflogger_1':{'element1':6,'element2':0,'element3':{'count':0,'sum':0},},}")
    );

    reg.clear();
    assert_eq!(reg.dump(), "{}");
}

#[test]
fn removing_one_set_leaves_the_other_byte_identical() {
    let reg = MetricRegistry::new();
    let pf1 = fake_set_1();
    let pf2 = fake_set_2();
    reg.add(Arc::clone(&pf1)).unwrap();
    let only_first = reg.dump();
    reg.add(Arc::clone(&pf2)).unwrap();

    reg.remove(&pf2);
    assert_eq!(reg.dump(), only_first);
}

#[test]
fn absent_remove_and_empty_clear_are_noops() {
    let reg = MetricRegistry::new();
    reg.add(fake_set_1()).unwrap();
    let before = reg.dump();

    // Same name, different identity: not the registered set.
    assert!(!reg.remove(&fake_set_1()));
    assert!(!reg.remove(&fake_set_2()));
    assert!(reg.remove_named("nope").is_none());
    assert_eq!(reg.dump(), before);

    let empty = MetricRegistry::new();
    empty.clear();
    assert_eq!(empty.dump(), "{}");
}

#[test]
fn duplicate_set_name_is_rejected() {
    let reg = MetricRegistry::new();
    let first = fake_set_1();
    reg.add(Arc::clone(&first)).unwrap();
    first.inc(SET1_ELEMENT_1).unwrap();
    let before = reg.dump();

    let err = reg.add(fake_set_1()).expect_err("must conflict");
    assert!(matches!(err, ProflogError::NameConflict(ref n) if n == "fake_proflogger_1"));
    assert_eq!(err.client_code().as_str(), "NAME_CONFLICT");
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.dump(), before);
}

#[test]
fn remove_named_hands_the_set_back() {
    let reg = MetricRegistry::new();
    reg.add(fake_set_1()).unwrap();
    reg.add(fake_set_2()).unwrap();
    assert_eq!(reg.names(), vec!["fake_proflogger_1", "fake_proflogger_2"]);

    let pf1 = reg.remove_named("fake_proflogger_1").unwrap();
    pf1.inc(SET1_ELEMENT_1).unwrap();
    assert_eq!(reg.names(), vec!["fake_proflogger_2"]);
    assert_eq!(pf1.get(SET1_ELEMENT_1).unwrap(), MetricValue::U64(1));

    // Registering again appends after the survivors.
    reg.add(pf1).unwrap();
    assert_eq!(reg.names(), vec!["fake_proflogger_2", "fake_proflogger_1"]);
    assert!(reg.get("fake_proflogger_1").is_some());
}

#[test]
fn schema_lists_counter_types() {
    let reg = MetricRegistry::new();
    reg.add(fake_set_1()).unwrap();
    assert_eq!(
        reg.schema(),
        sd("{'fake_proflogger_1':{'element1':{'type':'u64'},'element2':{'type':'float'},\
            'element3':{'type':'float_avg'},},}")
    );
}

#[test]
fn dump_while_threads_mutate() {
    let reg = Arc::new(MetricRegistry::new());
    let pf = fake_set_1();
    reg.add(Arc::clone(&pf)).unwrap();

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let pf = Arc::clone(&pf);
            thread::spawn(move || {
                for _ in 0..1000 {
                    pf.inc(SET1_ELEMENT_1).unwrap();
                    pf.finc(SET1_ELEMENT_3, 1.0).unwrap();
                }
            })
        })
        .collect();

    let reader = {
        let reg = Arc::clone(&reg);
        thread::spawn(move || {
            for _ in 0..100 {
                let d = reg.dump();
                assert!(d.starts_with("{\"fake_proflogger_1\":{"), "{d}");
                assert!(d.ends_with("},}"), "{d}");
            }
        })
    };

    for w in writers {
        w.join().unwrap();
    }
    reader.join().unwrap();

    assert_eq!(
        reg.dump(),
        sd("{'fake_proflogger_1':{'element1':4000,'element2':0,'element3':{'count':4000,'sum':4000},},}")
    );
}

#[test]
fn extreme_gauges_stay_compact() {
    let mut bld = proflog_core::MetricSetBuilder::new("s", 0, 3).unwrap();
    bld.add_float(1, "big").unwrap();
    bld.add_float(2, "tiny").unwrap();
    let set = Arc::new(bld.create());
    set.fset(1, 1e300).unwrap();
    set.fset(2, 1e-300).unwrap();

    let reg = MetricRegistry::new();
    reg.add(set).unwrap();
    assert_eq!(reg.dump(), sd("{'s':{'big':1e300,'tiny':1e-300,},}"));
}
