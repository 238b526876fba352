use limbo::config::Config;
use limbo::context::Context;
use limbo::structures::clause::Clause;
use limbo::structures::ewff::Ewff;
use limbo::structures::term::Term;

/// Two belief conditionals over independent atoms L1/R1/L2: an unconditional default `=> ¬L1`
/// (always open, never refuted) and a genuine conditional `¬R1 => L2` ("believe L2 given R1 is
/// still open"). Neither static nor boxed clauses are registered, so the root setup itself carries
/// no information at all --- everything here comes from belief-conditional propagation.
fn build() -> (Context, Term, Term, Term) {
    let mut ctx = Context::from_config(Config::default());
    let l1_fun = ctx.create_fun(ctx.bool_sort(), 0).unwrap();
    let l1 = ctx.apply(l1_fun, vec![]).unwrap();
    let r1_fun = ctx.create_fun(ctx.bool_sort(), 0).unwrap();
    let r1 = ctx.apply(r1_fun, vec![]).unwrap();
    let l2_fun = ctx.create_fun(ctx.bool_sort(), 0).unwrap();
    let l2 = ctx.apply(l2_fun, vec![]).unwrap();
    let true_name = ctx.true_name();

    let not_l1 = ctx.literal(vec![], false, l1, true_name).unwrap();
    ctx.add_belief_conditional(Clause::empty(), Clause::unit(not_l1), 0).unwrap();

    let not_r1 = ctx.literal(vec![], false, r1, true_name).unwrap();
    let l2_lit = ctx.literal(vec![], true, l2, true_name).unwrap();
    ctx.add_belief_conditional(Clause::unit(not_r1), Clause::unit(l2_lit), 0).unwrap();

    ctx.init(&[]).unwrap();
    (ctx, l1, r1, l2)
}

#[test]
fn plain_entailment_does_not_see_defaults() {
    let (mut ctx, l1, _r1, _l2) = build();
    // `entails` routes to the least implausible *consistent* level, which here is the bare root
    // (it never becomes inconsistent): absolute knowledge doesn't pick up the default, unlike
    // conditional belief below.
    let not_l1 = ctx.literal(vec![], false, l1, ctx.true_name()).unwrap();
    assert!(!ctx.entails(&Clause::unit(not_l1), 0).unwrap());
}

#[test]
fn unconditional_default_is_conditionally_believed() {
    let (mut ctx, l1, _r1, _l2) = build();
    let not_l1 = ctx.literal(vec![], false, l1, ctx.true_name()).unwrap();
    assert!(ctx
        .entails_conditional(&Clause::empty(), &Clause::unit(not_l1), 0)
        .unwrap());
}

#[test]
fn genuine_conditional_is_believed_given_its_antecedent() {
    let (mut ctx, _l1, r1, l2) = build();
    let true_name = ctx.true_name();
    let not_r1 = ctx.literal(vec![], false, r1, true_name).unwrap();
    let l2_lit = ctx.literal(vec![], true, l2, true_name).unwrap();

    assert!(ctx
        .entails_conditional(&Clause::unit(not_r1), &Clause::unit(l2_lit), 0)
        .unwrap());
}

#[test]
fn conditional_does_not_believe_an_unrelated_consequent() {
    let (mut ctx, _l1, r1, l2) = build();
    let true_name = ctx.true_name();
    let not_r1 = ctx.literal(vec![], false, r1, true_name).unwrap();
    let not_l2 = ctx.literal(vec![], false, l2, true_name).unwrap();

    assert!(!ctx
        .entails_conditional(&Clause::unit(not_r1), &Clause::unit(not_l2), 0)
        .unwrap());
}

#[test]
fn sensing_result_is_entailed_immediately() {
    let mut ctx = Context::from_config(Config::default());
    let action = ctx.create_sort(false);
    let a = ctx.create_name(action).unwrap();
    let sf = ctx.create_fun(ctx.bool_sort(), 1).unwrap();
    ctx.declare_sensing_function(sf);

    ctx.init(&[vec![a]]).unwrap();
    ctx.add_sensing_result(vec![], a, true).unwrap();

    let sf_a = ctx.apply(sf, vec![a]).unwrap();
    let lit = ctx.literal(vec![], true, sf_a, ctx.true_name()).unwrap();
    assert!(ctx.entails(&Clause::unit(lit), 0).unwrap());
}
