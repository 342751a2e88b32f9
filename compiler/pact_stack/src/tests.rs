use super::*;

#[test]
fn test_nested_closure_result() {
    fn depth(n: u32) -> u32 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
    }

    assert_eq!(depth(64), 64);
}

#[test]
fn test_deep_recursion_grows_stack() {
    fn sum_to(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { n + sum_to(n - 1) })
    }

    // far deeper than the default 8MB thread stack allows unguarded
    assert_eq!(sum_to(200_000), 20_000_100_000);
}

#[test]
fn test_propagates_errors() {
    let result: Result<u8, String> = ensure_sufficient_stack(|| Err("boom".to_string()));
    assert_eq!(result, Err("boom".to_string()));
}
