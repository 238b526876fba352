use limbo::config::Config;
use limbo::context::Context;
use limbo::structures::clause::Clause;
use limbo::structures::ewff::Ewff;

/// Four belt positions `d(0..3)` and a single forward action `f`. `d(i+1)` now implies `d(i)` after
/// `f` (the belt shifts one position per step); positions 2 and 3 are the only ones constrained in
/// the initial situation.
fn build(extra_static_not_d3: bool) -> (Context, Clause) {
    let mut ctx = Context::from_config(Config::default());

    let pos = ctx.create_sort(false);
    let p1 = ctx.create_name(pos).unwrap();
    let p2 = ctx.create_name(pos).unwrap();
    let p3 = ctx.create_name(pos).unwrap();

    let action = ctx.create_sort(false);
    let f = ctx.create_name(action).unwrap();

    let d = ctx.create_fun(ctx.bool_sort(), 1).unwrap();
    let d1 = ctx.apply(d, vec![p1]).unwrap();
    let d2 = ctx.apply(d, vec![p2]).unwrap();
    let d3 = ctx.apply(d, vec![p3]).unwrap();

    let true_name = ctx.true_name();

    let not_d2_here = ctx.literal(vec![], false, d2, true_name).unwrap();
    let not_d3_here = ctx.literal(vec![], false, d3, true_name).unwrap();
    let d1_after_f = ctx.literal(vec![f], true, d1, true_name).unwrap();
    let d2_after_f = ctx.literal(vec![f], true, d2, true_name).unwrap();

    ctx.add_boxed_clause(vec![not_d2_here, d1_after_f], Ewff::True).unwrap();
    ctx.add_boxed_clause(vec![not_d3_here, d2_after_f], Ewff::True).unwrap();

    let d2_here = ctx.literal(vec![], true, d2, true_name).unwrap();
    let d3_here = ctx.literal(vec![], true, d3, true_name).unwrap();
    ctx.add_static_clause(vec![d2_here, d3_here], Ewff::True).unwrap();

    if extra_static_not_d3 {
        let not_d3 = ctx.literal(vec![], false, d3, true_name).unwrap();
        ctx.add_static_clause(vec![not_d3], Ewff::True).unwrap();
    }

    ctx.init(&[vec![f]]).unwrap();

    let d1_after_f = ctx.literal(vec![f], true, d1, true_name).unwrap();
    let d2_after_f = ctx.literal(vec![f], true, d2, true_name).unwrap();
    let target = Clause::new(vec![d1_after_f, d2_after_f], Ewff::True);

    (ctx, target)
}

#[test]
fn split_boundary_at_k1() {
    let (mut ctx, target) = build(false);
    assert!(!ctx.entails(&target, 0).unwrap());
    assert!(ctx.entails(&target, 1).unwrap());
}

#[test]
fn monotonic_in_k() {
    let (mut ctx, target) = build(false);
    assert!(ctx.entails(&target, 1).unwrap());
    assert!(ctx.entails(&target, 2).unwrap());
}

#[test]
fn monotonic_in_static_facts() {
    // Adding `¬d(3)` directly to the initial situation lets unit propagation alone derive the
    // target, with no case split needed at all.
    let (mut ctx, target) = build(true);
    assert!(ctx.entails(&target, 0).unwrap());
}
