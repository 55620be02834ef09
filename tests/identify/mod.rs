//! Classification tests against the built-in rule table.

mod adversarial;
mod containers;
mod disambiguation;
mod probing;
mod reference_table;
