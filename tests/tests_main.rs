#[path = "helpers/mod.rs"]
mod helpers;

#[path = "adapt/mod.rs"]
mod adapt;

#[path = "translate/mod.rs"]
mod translate;
