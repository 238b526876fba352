/*!
A library for deciding queries of knowledge and (graded) belief against a basic action theory, in
the style of Lakemeyer and Levesque's logic of limited belief.

limbo is built around a three-tier picture of reasoning:
- A [Setup](db::setup::Setup) is a minimised, unit-propagated set of ground clauses with a
  split-k decision procedure (`k` bounds how many case splits on possibly-essential literals the
  procedure is willing to try before giving up and answering "unknown" rather than searching
  forever).
- [Setups](db::setups::Setups) layers setups into a plausibility ranking: conditional beliefs
  `phi => psi` are attached to the least implausible level consistent with `phi`, following the
  propagation procedure of Theorem 7 of the source theory.
- A [Context](context::Context) owns a term factory and a basic action theory (static and boxed
  universal clauses, conditional beliefs), grounds it over a finite Herbrand universe relevant to
  the queries it will be asked, and decides both objective clauses and full
  knowledge/belief [Formula](query::Formula) queries against the resulting setups.

# Orientation

Useful starting points:
- [context] for the entry point into the library --- building a theory and deciding queries
  against it.
- [db] for the ground clause databases a decision procedure actually runs over.
- [query] for the query language (`K`, `B`, quantifiers, actions) and its ENNF normalisation.
- [structures] for the term, literal, clause, and guard representations everything else is built
  from.
- [grounder] for how the finite Herbrand universe a query is decided over is computed.
- [config] for what a [Context](context::Context) can be configured with.

# Example

```rust
# use limbo::context::Context;
# use limbo::config::Config;
# use limbo::structures::clause::Clause;
# use limbo::structures::ewff::Ewff;
let mut ctx = Context::from_config(Config::default());

let block = ctx.create_sort(false);
let a = ctx.create_name(block).unwrap();
let on_table = ctx.create_fun(ctx.bool_sort(), 1).unwrap();
let on_table_a = ctx.apply(on_table, vec![a]).unwrap();

let lit = ctx.literal(vec![], true, on_table_a, ctx.true_name()).unwrap();
ctx.add_static_clause(vec![lit.clone()], Ewff::True).unwrap();

ctx.init(&[]).unwrap();
assert!(ctx.entails(&Clause::unit(lit), 0).unwrap());
```

# Logs

Calls to [log!](log) are made throughout, under the targets listed in [misc::log]. For example,
with [env_logger](https://docs.rs/env_logger/latest/env_logger/), logs of the case-split procedure
can be isolated with `RUST_LOG=split=trace …`, and logs of H+ construction with
`RUST_LOG=grounding=trace …`.
*/

#![allow(clippy::collapsible_else_if)]
#![allow(clippy::single_match)]

pub mod config;
pub mod context;
pub mod db;
pub mod grounder;
pub mod misc;
pub mod query;
pub mod reports;
pub mod structures;
pub mod types;
