/*!
The context --- to which a basic action theory is added and against which queries are decided.

Strictly, a lifecycle of two states: [ContextState::Building], while static/boxed clauses and
belief conditionals are still being registered, and [ContextState::Ready], once [Context::init] has
grounded, minimised, and sealed the root setup. Only a few operations (adding a sensing result,
guaranteeing consistency, deciding entailment) are meaningful once `Ready`; only ingestion is
meaningful while `Building`. This mirrors the otter_sat convention of a small, explicit
`ContextState` rather than encoding the same information in `Option` fields scattered across the
struct.

# Example
```rust
# use limbo::context::Context;
# use limbo::config::Config;
# use limbo::structures::clause::Clause;
# use limbo::structures::ewff::Ewff;
let mut ctx = Context::from_config(Config::default());

let block = ctx.create_sort(false);
let a = ctx.create_name(block).unwrap();
let holding = ctx.create_fun(ctx.bool_sort(), 1).unwrap();
let holding_a = ctx.apply(holding, vec![a]).unwrap();

let holds = ctx.literal(vec![], true, holding_a, ctx.true_name()).unwrap();
ctx.add_static_clause(vec![holds.clone()], Ewff::True).unwrap();

ctx.init(&[]).unwrap();
assert!(ctx.entails(&Clause::unit(holds), 0).unwrap());
```
*/

mod generic;
pub use generic::Context;

/// The lifecycle state of a [Context].
#[derive(Debug, PartialEq, Eq)]
pub enum ContextState {
    /// Static/boxed clauses and belief conditionals may still be registered.
    Building,

    /// [Context::init] has run: the root setup is sealed and entailment queries are accepted.
    Ready,
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Building => write!(f, "Building"),
            Self::Ready => write!(f, "Ready"),
        }
    }
}
