use limbo::config::Config;
use limbo::context::Context;
use limbo::structures::clause::Clause;
use limbo::structures::ewff::Ewff;

/// A simplified grid-reasoning scenario in the flavour of Minesweeper's `Mine(x, y)`, abstracted
/// to a single `Mine(cell)` predicate over four named cells: exactly the same proof shape as the
/// forward/sonar belt scenario (two rules chained off a single disjunctive fact), relabelled.
fn build() -> (Context, Clause) {
    let mut ctx = Context::from_config(Config::default());

    let cell = ctx.create_sort(false);
    let a = ctx.create_name(cell).unwrap();
    let b = ctx.create_name(cell).unwrap();
    let c = ctx.create_name(cell).unwrap();
    let d = ctx.create_name(cell).unwrap();

    let mine = ctx.create_fun(ctx.bool_sort(), 1).unwrap();
    let mine_a = ctx.apply(mine, vec![a]).unwrap();
    let mine_b = ctx.apply(mine, vec![b]).unwrap();
    let mine_c = ctx.apply(mine, vec![c]).unwrap();
    let mine_d = ctx.apply(mine, vec![d]).unwrap();

    let true_name = ctx.true_name();

    let mine_a_lit = ctx.literal(vec![], true, mine_a, true_name).unwrap();
    let mine_b_lit = ctx.literal(vec![], true, mine_b, true_name).unwrap();
    ctx.add_static_clause(vec![mine_a_lit, mine_b_lit], Ewff::True).unwrap();

    // Revealing a safe neighbour rules out a mine in the adjacent cell: A rules out C, B rules out D.
    let not_mine_a = ctx.literal(vec![], false, mine_a, true_name).unwrap();
    let not_mine_c = ctx.literal(vec![], false, mine_c, true_name).unwrap();
    ctx.add_static_clause(vec![not_mine_a, not_mine_c], Ewff::True).unwrap();

    let not_mine_b = ctx.literal(vec![], false, mine_b, true_name).unwrap();
    let not_mine_d = ctx.literal(vec![], false, mine_d, true_name).unwrap();
    ctx.add_static_clause(vec![not_mine_b, not_mine_d], Ewff::True).unwrap();

    ctx.init(&[]).unwrap();

    let not_mine_c = ctx.literal(vec![], false, mine_c, true_name).unwrap();
    let not_mine_d = ctx.literal(vec![], false, mine_d, true_name).unwrap();
    let target = Clause::new(vec![not_mine_c, not_mine_d], Ewff::True);

    (ctx, target)
}

#[test]
fn one_split_closes_both_branches() {
    let (mut ctx, target) = build();
    assert!(!ctx.entails(&target, 0).unwrap());
    assert!(ctx.entails(&target, 1).unwrap());
}

#[test]
fn already_inconsistent_setup_entails_everything() {
    // Forcing both candidate mines present at once contradicts both exclusion rules, so the root
    // is 1-inconsistent and every clause --- including one the cells-at-once rules never mention
    // --- is trivially entailed (ex falso).
    let mut ctx = Context::from_config(Config::default());
    let cell = ctx.create_sort(false);
    let a = ctx.create_name(cell).unwrap();
    let c = ctx.create_name(cell).unwrap();

    let mine = ctx.create_fun(ctx.bool_sort(), 1).unwrap();
    let mine_a = ctx.apply(mine, vec![a]).unwrap();
    let mine_c = ctx.apply(mine, vec![c]).unwrap();
    let true_name = ctx.true_name();

    let mine_a_pos = ctx.literal(vec![], true, mine_a, true_name).unwrap();
    ctx.add_static_clause(vec![mine_a_pos], Ewff::True).unwrap();
    let mine_c_pos = ctx.literal(vec![], true, mine_c, true_name).unwrap();
    ctx.add_static_clause(vec![mine_c_pos], Ewff::True).unwrap();
    let not_mine_a = ctx.literal(vec![], false, mine_a, true_name).unwrap();
    let not_mine_c = ctx.literal(vec![], false, mine_c, true_name).unwrap();
    ctx.add_static_clause(vec![not_mine_a, not_mine_c], Ewff::True).unwrap();

    ctx.init(&[]).unwrap();

    assert!(ctx.inconsistent(0).unwrap());
    let unrelated = ctx.create_fun(ctx.bool_sort(), 0).unwrap();
    let unrelated = ctx.apply(unrelated, vec![]).unwrap();
    let unrelated_lit = ctx.literal(vec![], true, unrelated, ctx.true_name()).unwrap();
    assert!(ctx.entails(&Clause::unit(unrelated_lit), 0).unwrap());
}
