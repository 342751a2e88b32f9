//! One VM shared by many threads.

use std::thread;

use pactc::{OwnerInfo, Value, ValueMap, Vm};
use pretty_assertions::assert_eq;

use crate::common::vm;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn vm_is_shareable() {
    assert_send_sync::<Vm>();
}

#[test]
fn parallel_compiles_in_separate_scopes() {
    let vm = vm();
    thread::scope(|s| {
        for scope in 100..108_u32 {
            let vm = &vm;
            s.spawn(move || {
                let source = format!("func id int {{ return {scope} }}");
                vm.compile(&source, OwnerInfo::new(scope)).unwrap();
                for _ in 0..50 {
                    let values = vm
                        .call(&format!("@{scope}id"), Vec::new(), &mut ValueMap::new())
                        .unwrap();
                    assert_eq!(values, vec![Value::Int(i64::from(scope))]);
                }
            });
        }
    });
}

#[test]
fn calls_during_redeployment_see_whole_versions() {
    let vm = vm();
    let owner = OwnerInfo::new(7);
    vm.compile("func version int { return 0 }", owner).unwrap();

    thread::scope(|s| {
        s.spawn(|| {
            for version in 1..=50 {
                let source = format!("func version int {{ return {version} }}");
                vm.compile(&source, owner).unwrap();
            }
        });
        for _ in 0..4 {
            s.spawn(|| {
                let mut last = 0;
                for _ in 0..200 {
                    let values = vm
                        .call("@7version", Vec::new(), &mut ValueMap::new())
                        .unwrap();
                    let [Value::Int(version)] = values.as_slice() else {
                        panic!("unexpected result {values:?}");
                    };
                    assert!((0..=50).contains(version));
                    assert!(*version >= last, "versions never go backwards");
                    last = *version;
                }
            });
        }
    });

    assert_eq!(
        vm.call("@7version", Vec::new(), &mut ValueMap::new()).unwrap(),
        vec![Value::Int(50)]
    );
}

#[test]
fn calls_never_mix_two_deployments() {
    let vm = vm();
    let owner = OwnerInfo::new(8);
    let unit = |version: i64| {
        format!(
            "func b int {{ return {version} }}\nfunc a int {{ return {version} * 1000 + b() }}"
        )
    };
    vm.compile(&unit(0), owner).unwrap();

    thread::scope(|s| {
        s.spawn(|| {
            for version in 1..=300 {
                vm.compile(&unit(version), owner).unwrap();
            }
        });
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..300 {
                    let values = vm.call("@8a", Vec::new(), &mut ValueMap::new()).unwrap();
                    let [Value::Int(n)] = values.as_slice() else {
                        panic!("unexpected result {values:?}");
                    };
                    assert_eq!(*n / 1000, *n % 1000, "a and b come from one compile: {n}");
                }
            });
        }
    });
}

#[test]
fn calls_are_deterministic() {
    let vm = vm();
    vm.compile(
        r#"func mix(n int) string {
            var m map
            var i int
            while i < n {
                m[Sprintf("k%d", i)] = i * i
                i = i + 1
            }
            return Sprintf("%v", m)
        }"#,
        OwnerInfo::new(1),
    )
    .unwrap();
    let run = |vm: &Vm| {
        vm.call("@1mix", vec![Value::Int(12)], &mut ValueMap::new())
            .unwrap()
    };
    let first = run(&vm);
    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| run(&vm))).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for result in results {
        assert_eq!(result, first);
    }
}
